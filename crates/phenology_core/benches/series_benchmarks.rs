//! Criterion benchmarks for curve and band derivation
//!
//! Run with: cargo bench -p phenology_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use phenology_core::model::{NumericArray, SolverOutput};
use phenology_core::series::{derive_bands, derive_curves};

fn create_output(points: usize) -> SolverOutput {
    let x: Vec<f64> = (0..points).map(|i| 130.0 + i as f64 * 0.1).collect();
    let yz: Vec<Vec<f64>> = (0..points)
        .map(|i| vec![125.0 + (i % 20) as f64, 4.0 + (i % 3) as f64])
        .collect();

    SolverOutput {
        x_cv: NumericArray::Matrix(vec![x, vec![0.0; points]]),
        yz_v: NumericArray::Matrix(yz),
        n_v: NumericArray::Vector(vec![0.0; points]),
        z_n: NumericArray::Scalar(14.0),
    }
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    for points in [50, 500, 5_000] {
        let output = create_output(points);

        group.bench_with_input(BenchmarkId::new("curves", points), &output, |b, output| {
            b.iter(|| derive_curves(black_box(output)).unwrap())
        });

        let curves = derive_curves(&output).unwrap();
        group.bench_with_input(BenchmarkId::new("bands", points), &curves, |b, curves| {
            b.iter(|| derive_bands(black_box(curves)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_derive);
criterion_main!(benches);
