//! Data types shared by the sweep, cache and series modules.

mod array;
mod config;
mod output;
mod results;

pub use array::NumericArray;
pub use config::{GRID_LOOKUP_TOLERANCE, MAX_GRID_POINTS, SweepConfig};
pub use output::{OUTPUT_VARIABLES, SolverOutput};
pub use results::{SweepEntry, SweepResult};
