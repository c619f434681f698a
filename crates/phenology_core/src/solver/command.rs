//! Solver backed by an arbitrary external program.

use std::process::Command;

use super::{Solver, checked_stdout, parse_output};
use crate::error::SolverError;
use crate::model::SolverOutput;

/// Runs `program args... <u_q>` and reads a JSON object with the four
/// variables (`x_cV`, `yzV`, `nV`, `z_n`) from stdout.
#[derive(Debug, Clone)]
pub struct CommandSolver {
    program: String,
    args: Vec<String>,
}

impl CommandSolver {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Solver for CommandSolver {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        tracing::debug!(u_q, program = %self.program, "running solver command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(u_q.to_string())
            .output()
            .map_err(|source| SolverError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = checked_stdout(u_q, output)?;
        parse_output(u_q, &stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_command_solver_reads_stdout() {
        let script = r#"echo '{"x_cV": [140, 141], "yzV": [[130, 5], [131, 6]], "nV": [0, 0], "z_n": [14, 15]}'"#;
        let mut solver = CommandSolver::new("sh", vec!["-c".to_string(), script.to_string()]);

        let output = solver.solve(130.0).unwrap();
        assert_eq!(output.yz_v.shape(), (2, 2));
    }

    #[test]
    fn test_command_solver_reports_failure() {
        let mut solver = CommandSolver::new(
            "sh",
            vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
        );

        let err = solver.solve(130.0).unwrap_err();
        match err {
            SolverError::Failed { status, stderr, .. } => {
                assert_eq!(status, Some(3));
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_command_solver_missing_program() {
        let mut solver = CommandSolver::new("definitely-not-a-solver-binary", vec![]);
        assert!(matches!(
            solver.solve(130.0),
            Err(SolverError::Spawn { .. })
        ));
    }
}
