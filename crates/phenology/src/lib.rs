//! Terminal explorer for a phenology parameter sweep
//!
//! Loads (or recomputes through an external solver) the cached sweep, then
//! shows the arrival, laying and hatching dates for one parameter value at a
//! time, with a slider to move across the grid.

pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod logging;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

pub use app::App;
pub use config::{Overrides, Settings};
pub use logging::{default_log_dir, init_logging};
