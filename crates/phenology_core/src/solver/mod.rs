//! Boundary to the external numerical solver.
//!
//! The sweep only sees the [`Solver`] trait. How the engine is reached is an
//! implementation detail:
//! - [`OctaveSolver`]: one `octave-cli` session per call
//! - [`CommandSolver`]: any program that prints the four variables as JSON

mod command;
mod octave;

use std::process::Output;

use serde_json::{Map, Value};

use crate::error::SolverError;
use crate::model::{NumericArray, OUTPUT_VARIABLES, SolverOutput};

pub use command::CommandSolver;
pub use octave::{DEFAULT_FUNCTION, DEFAULT_PROGRAM, OctaveSolver};

/// Evaluates the external model for one parameter value.
///
/// Calls are blocking and independent; an error is fatal to the sweep.
pub trait Solver {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError>;
}

impl<S: Solver + ?Sized> Solver for &mut S {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        (**self).solve(u_q)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        (**self).solve(u_q)
    }
}

/// Parse a JSON object holding the four solver variables by name.
///
/// Extra keys are ignored; a missing key is reported by name.
pub fn parse_output(u_q: f64, json: &str) -> Result<SolverOutput, SolverError> {
    let namespace: Map<String, Value> =
        serde_json::from_str(json.trim()).map_err(|e| SolverError::Malformed {
            u_q,
            reason: e.to_string(),
        })?;

    let pull = |name: &'static str| -> Result<NumericArray, SolverError> {
        let value = namespace
            .get(name)
            .cloned()
            .ok_or(SolverError::MissingVariable { u_q, name })?;
        serde_json::from_value(value).map_err(|e| SolverError::Malformed {
            u_q,
            reason: format!("variable '{name}': {e}"),
        })
    };

    let output = SolverOutput {
        x_cv: pull(OUTPUT_VARIABLES[0])?,
        yz_v: pull(OUTPUT_VARIABLES[1])?,
        n_v: pull(OUTPUT_VARIABLES[2])?,
        z_n: pull(OUTPUT_VARIABLES[3])?,
    };
    output.check_rectangular()?;
    Ok(output)
}

/// Turn a finished process into its stdout, or a failure carrying stderr
fn checked_stdout(u_q: f64, output: Output) -> Result<String, SolverError> {
    if !output.status.success() {
        return Err(SolverError::Failed {
            u_q,
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    String::from_utf8(output.stdout).map_err(|e| SolverError::Malformed {
        u_q,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_pulls_by_name() {
        let json = r#"{
            "x_cV": [[140, 141, 142], [0, 0, 0]],
            "yzV": [[130, 5], [131, 5], [132, 4]],
            "nV": [1, 2, 3],
            "z_n": 14,
            "extra": "ignored"
        }"#;

        let output = parse_output(130.0, json).unwrap();
        assert_eq!(output.x_cv.shape(), (2, 3));
        assert_eq!(output.yz_v.shape(), (3, 2));
        assert_eq!(output.z_n, NumericArray::Scalar(14.0));
    }

    #[test]
    fn test_parse_output_names_missing_variable() {
        let json = r#"{"x_cV": [1], "yzV": [[1, 2]], "z_n": 1}"#;
        let err = parse_output(125.0, json).unwrap_err();
        assert!(matches!(
            err,
            SolverError::MissingVariable { name: "nV", .. }
        ));
    }

    #[test]
    fn test_parse_output_rejects_non_numeric() {
        let json = r#"{"x_cV": [1], "yzV": "oops", "nV": [1], "z_n": 1}"#;
        let err = parse_output(125.0, json).unwrap_err();
        assert!(matches!(err, SolverError::Malformed { .. }));
        assert!(err.to_string().contains("yzV"));
    }

    #[test]
    fn test_parse_output_rejects_ragged() {
        let json = r#"{"x_cV": [1], "yzV": [[1, 2], [3]], "nV": [1], "z_n": 1}"#;
        let err = parse_output(125.0, json).unwrap_err();
        assert!(matches!(err, SolverError::Ragged { name: "yzV" }));
    }
}
