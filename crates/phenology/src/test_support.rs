//! Fixtures shared by the unit tests

use std::path::Path;

use phenology_core::{
    CacheFile, NumericArray, PhenologySession, Solver, SolverError, SolverOutput, SweepCache,
    SweepConfig,
};

/// Three-row solver output; optionally returns an unusable adjustment for one value
pub struct FixedSolver {
    pub calls: usize,
    bad_shape_at: Option<f64>,
}

impl FixedSolver {
    pub fn new() -> Self {
        Self {
            calls: 0,
            bad_shape_at: None,
        }
    }

    pub fn bad_shape_at(u_q: f64) -> Self {
        Self {
            calls: 0,
            bad_shape_at: Some(u_q),
        }
    }
}

impl Solver for FixedSolver {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        self.calls += 1;
        let z_n = if self.bad_shape_at == Some(u_q) {
            NumericArray::Vector(vec![14.0, 14.0])
        } else {
            NumericArray::Scalar(14.0)
        };
        Ok(SolverOutput {
            x_cv: NumericArray::Vector(vec![140.0, 150.0, 160.0]),
            yz_v: NumericArray::Matrix(vec![
                vec![u_q, 5.0],
                vec![u_q + 1.0, 5.0],
                vec![u_q + 2.0, 5.0],
            ]),
            n_v: NumericArray::Scalar(1.0),
            z_n,
        })
    }
}

/// `125..=127` step 1, cached in `dir`
pub fn small_cache(dir: &Path) -> SweepCache {
    SweepCache::new(
        SweepConfig::new(125.0, 127.0, 1.0).unwrap(),
        CacheFile::new(dir.join("arrival_times.json")),
    )
}

pub fn small_session(dir: &Path, solver: &mut FixedSolver) -> PhenologySession {
    PhenologySession::open(&small_cache(dir), solver, |_| {}).unwrap()
}
