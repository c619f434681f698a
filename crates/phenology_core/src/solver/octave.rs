//! Octave-backed solver.
//!
//! Each call starts a fresh `octave-cli` session, puts the search path on the
//! Octave path, evaluates the wrapper function and prints the four variables
//! as JSON between two marker lines. Anything else Octave prints is ignored.

use std::path::PathBuf;
use std::process::Command;

use super::{Solver, checked_stdout, parse_output};
use crate::error::SolverError;
use crate::model::SolverOutput;

const BEGIN_MARKER: &str = "__PHENOLOGY_OUTPUT_BEGIN__";
const END_MARKER: &str = "__PHENOLOGY_OUTPUT_END__";

/// Octave executable used unless configured otherwise
pub const DEFAULT_PROGRAM: &str = "octave-cli";

/// Default name of the Octave wrapper around the dynamic-programming model
pub const DEFAULT_FUNCTION: &str = "solvedbowrapper";

#[derive(Debug, Clone)]
pub struct OctaveSolver {
    program: String,
    function: String,
    search_path: PathBuf,
}

impl OctaveSolver {
    pub fn new(search_path: PathBuf) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            function: DEFAULT_FUNCTION.to_string(),
            search_path,
        }
    }

    /// Use a different Octave executable
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Call a different wrapper function
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = function.into();
        self
    }

    /// The Octave expression evaluated for one parameter value.
    ///
    /// `u_q` is formatted with six decimals, as the wrapper has always
    /// received it.
    pub fn script(&self, u_q: f64) -> String {
        let path = self.search_path.display().to_string().replace('\'', "''");
        format!(
            "addpath('{path}'); \
             [x_cV, yzV, nV, z_n] = {function}({u_q:.6}); \
             disp('{BEGIN_MARKER}'); \
             disp(jsonencode(struct('x_cV', x_cV, 'yzV', yzV, 'nV', nV, 'z_n', z_n))); \
             disp('{END_MARKER}');",
            function = self.function,
        )
    }
}

impl Solver for OctaveSolver {
    fn solve(&mut self, u_q: f64) -> Result<SolverOutput, SolverError> {
        let script = self.script(u_q);
        tracing::debug!(u_q, program = %self.program, "starting octave session");

        let output = Command::new(&self.program)
            .args(["--no-gui", "--quiet", "--no-window-system", "--eval"])
            .arg(&script)
            .current_dir(&self.search_path)
            .output()
            .map_err(|source| SolverError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = checked_stdout(u_q, output)?;
        let payload = extract_payload(&stdout).ok_or_else(|| SolverError::Malformed {
            u_q,
            reason: "octave printed no output block".to_string(),
        })?;
        parse_output(u_q, payload)
    }
}

/// The text between the marker lines, if both are present
fn extract_payload(stdout: &str) -> Option<&str> {
    let start = stdout.find(BEGIN_MARKER)? + BEGIN_MARKER.len();
    let end = start + stdout[start..].find(END_MARKER)?;
    Some(stdout[start..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_formats_parameter_like_printf() {
        let solver = OctaveSolver::new(PathBuf::from("/models"));
        let script = solver.script(130.0);
        assert!(script.contains("addpath('/models')"));
        assert!(script.contains("= solvedbowrapper(130.000000)"));
    }

    #[test]
    fn test_script_escapes_quotes_in_path() {
        let solver = OctaveSolver::new(PathBuf::from("/it's here")).function("other");
        let script = solver.script(1.5);
        assert!(script.contains("addpath('/it''s here')"));
        assert!(script.contains("= other(1.500000)"));
    }

    #[test]
    fn test_extract_payload_skips_noise() {
        let stdout = format!(
            "warning: something\n{BEGIN_MARKER}\n{{\"a\": 1}}\n{END_MARKER}\nans = 0\n"
        );
        assert_eq!(extract_payload(&stdout), Some("{\"a\": 1}"));
        assert_eq!(extract_payload("no markers"), None);
    }
}
