//! Phenology parameter-sweep library
//!
//! This crate turns an external dynamic-optimization solver into plot-ready
//! series for arrival, egg-laying and hatching dates. It provides:
//! - A [`Solver`] boundary with Octave and generic-command backends
//! - A disk-backed sweep cache keyed on the configured `(min, max, step)`
//! - Curve and fill-band derivation for one parameter value
//! - Line and patch bundles for a plotting front-end
//!
//! # Example
//!
//! ```ignore
//! use phenology_core::{CacheFile, OctaveSolver, PhenologySession, SweepCache, SweepConfig};
//!
//! let cache = SweepCache::new(SweepConfig::default(), CacheFile::in_working_dir());
//! let mut solver = OctaveSolver::new(std::env::current_dir()?);
//! let session = PhenologySession::open(&cache, &mut solver, |_| {})?;
//! let frame = session.frame(130.0)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod cache;
pub mod error;
pub mod io;
pub mod render;
pub mod series;
pub mod session;
pub mod solver;
pub mod sweep;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cache::{CACHE_FORMAT_VERSION, CacheFile, DEFAULT_CACHE_FILE, PersistedSweep};
pub use error::{CacheError, ConfigError, SessionError, ShapeError, SolverError, SweepError};
pub use model::{NumericArray, SolverOutput, SweepConfig, SweepEntry, SweepResult};
pub use render::{LineBundle, PatchBundle, RenderFrame};
pub use series::{
    Band, DerivedCurves, FillBands, FillRegion, build_fill_region, derive_bands, derive_curves,
};
pub use session::PhenologySession;
pub use solver::{CommandSolver, OctaveSolver, Solver};
pub use sweep::{CacheStatus, ColdReason, SweepCache, SweepOutcome, SweepProgress, run_sweep};
