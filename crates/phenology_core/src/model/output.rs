use serde::{Deserialize, Serialize};

use super::NumericArray;
use crate::error::SolverError;

/// Names of the four variables pulled from the solver namespace, in order
pub const OUTPUT_VARIABLES: [&str; 4] = ["x_cV", "yzV", "nV", "z_n"];

/// The four fields the solver returns for one parameter value.
///
/// Field names match the solver's variable names so the persisted JSON is
/// self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverOutput {
    /// Coordinate array; only row 0 is meaningful
    #[serde(rename = "x_cV")]
    pub x_cv: NumericArray,
    /// Two-column offset array (arrival, laying delay)
    #[serde(rename = "yzV")]
    pub yz_v: NumericArray,
    /// Auxiliary array, carried through untouched
    #[serde(rename = "nV")]
    pub n_v: NumericArray,
    /// Adjustment term added on top of the laying date
    pub z_n: NumericArray,
}

impl SolverOutput {
    /// Reject matrices with rows of different lengths
    pub fn check_rectangular(&self) -> Result<(), SolverError> {
        let fields = [&self.x_cv, &self.yz_v, &self.n_v, &self.z_n];
        for (&name, field) in OUTPUT_VARIABLES.iter().zip(fields) {
            if !field.is_rectangular() {
                return Err(SolverError::Ragged { name });
            }
        }
        Ok(())
    }
}
