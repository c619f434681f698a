//! Shared fixtures: an in-memory solver that records every call

use crate::error::SolverError;
use crate::model::{NumericArray, SolverOutput};
use crate::solver::Solver;

/// Number of points along the coordinate axis in synthetic outputs
pub const POINTS: usize = 8;

/// Deterministic solver output for `u_q` with non-negative offsets
pub fn sample_output(u_q: f64) -> SolverOutput {
    let x: Vec<f64> = (0..POINTS).map(|i| 140.0 + i as f64 * 4.0).collect();
    let yz: Vec<Vec<f64>> = (0..POINTS)
        .map(|i| vec![u_q + i as f64 * 0.5, 5.0 + (u_q - 125.0) * 0.1])
        .collect();

    SolverOutput {
        // Second row is padding the wrapper emits; only row 0 is read.
        x_cv: NumericArray::Matrix(vec![x, vec![0.0; POINTS]]),
        yz_v: NumericArray::Matrix(yz),
        n_v: NumericArray::Vector(vec![1.0; POINTS]),
        z_n: NumericArray::Vector((0..POINTS).map(|i| 14.0 + i as f64 * 0.25).collect()),
    }
}

/// Solver that answers from [`sample_output`] and records each call
#[derive(Debug, Default)]
pub struct ScriptedSolver {
    pub calls: Vec<f64>,
    pub fail_at: Option<f64>,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(u_q: f64) -> Self {
        Self {
            calls: Vec::new(),
            fail_at: Some(u_q),
        }
    }
}

impl Solver for ScriptedSolver {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        self.calls.push(u_q);
        if self.fail_at == Some(u_q) {
            return Err(SolverError::MissingVariable { u_q, name: "yzV" });
        }
        Ok(sample_output(u_q))
    }
}
