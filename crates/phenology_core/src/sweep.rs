//! Compute-or-load of the full parameter sweep.
//!
//! A persisted sweep is reused only when its range equals the configured one
//! exactly; otherwise every grid point is recomputed from scratch. Nothing is
//! written until the whole sweep has succeeded.

use jiff::Timestamp;

use crate::cache::{CacheFile, PersistedSweep};
use crate::error::{CacheError, SweepError};
use crate::model::{SweepConfig, SweepEntry, SweepResult};
use crate::solver::Solver;

/// Emitted before each solver call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepProgress {
    pub index: usize,
    pub total: usize,
    pub u_q: f64,
}

/// Why the persisted sweep could not be reused
#[derive(Debug, Clone, PartialEq)]
pub enum ColdReason {
    /// Recompute was requested explicitly
    Forced,
    /// The file was missing, unreadable or failed validation
    Unusable(String),
    /// The file holds a sweep over a different range
    RangeChanged { previous: SweepConfig },
}

impl std::fmt::Display for ColdReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColdReason::Forced => write!(f, "recompute requested"),
            ColdReason::Unusable(msg) => write!(f, "{msg}"),
            ColdReason::RangeChanged { previous } => write!(
                f,
                "range changed from {}..={} step {}",
                previous.min, previous.max, previous.step
            ),
        }
    }
}

/// Where the sweep in a [`SweepOutcome`] came from
#[derive(Debug, Clone, PartialEq)]
pub enum CacheStatus {
    Loaded,
    Recomputed(ColdReason),
}

/// The sweep plus how it was obtained
#[derive(Debug)]
pub struct SweepOutcome {
    pub result: SweepResult,
    pub status: CacheStatus,
    pub computed_at: Timestamp,
    /// Set when a fresh sweep could not be written back
    pub persist_error: Option<CacheError>,
}

/// Loads the configured sweep from disk, or recomputes and stores it
#[derive(Debug, Clone)]
pub struct SweepCache {
    config: SweepConfig,
    file: CacheFile,
    force: bool,
}

impl SweepCache {
    pub fn new(config: SweepConfig, file: CacheFile) -> Self {
        Self {
            config,
            file,
            force: false,
        }
    }

    /// Skip the load step and always recompute
    pub fn force_recompute(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn file(&self) -> &CacheFile {
        &self.file
    }

    /// Try to reuse the persisted sweep for the configured range
    pub fn load(&self) -> Result<(SweepResult, Timestamp), ColdReason> {
        if self.force {
            return Err(ColdReason::Forced);
        }

        let persisted = self
            .file
            .load()
            .map_err(|e| ColdReason::Unusable(e.to_string()))?;

        let previous = persisted.config();
        if !previous.same_range(&self.config) {
            return Err(ColdReason::RangeChanged { previous });
        }

        let computed_at = persisted.computed_at;
        let result = persisted
            .into_result()
            .map_err(|e| ColdReason::Unusable(e.to_string()))?;
        Ok((result, computed_at))
    }

    /// Reuse the persisted sweep when it matches, otherwise run the full
    /// sweep through `solver` and persist it.
    pub fn load_or_compute<S, F>(
        &self,
        solver: &mut S,
        on_progress: F,
    ) -> Result<SweepOutcome, SweepError>
    where
        S: Solver + ?Sized,
        F: FnMut(SweepProgress),
    {
        self.config.validate()?;

        let reason = match self.load() {
            Ok((result, computed_at)) => {
                tracing::info!(
                    path = %self.file.path().display(),
                    entries = result.len(),
                    "reusing persisted sweep"
                );
                return Ok(SweepOutcome {
                    result,
                    status: CacheStatus::Loaded,
                    computed_at,
                    persist_error: None,
                });
            }
            Err(reason) => reason,
        };

        tracing::info!(%reason, "sweep cache is cold, recomputing");
        let result = run_sweep(&self.config, solver, on_progress)?;
        let computed_at = Timestamp::now();

        let persist_error = self
            .file
            .save(&PersistedSweep::new(&result, computed_at))
            .err();
        if let Some(e) = &persist_error {
            tracing::warn!(error = %e, "sweep computed but not persisted");
        }

        Ok(SweepOutcome {
            result,
            status: CacheStatus::Recomputed(reason),
            computed_at,
            persist_error,
        })
    }
}

/// Evaluate `solver` at every grid point of `config`, in order.
///
/// An invalid `config` is rejected before the solver is called. The first
/// solver error aborts the sweep and no partial result is returned.
pub fn run_sweep<S, F>(
    config: &SweepConfig,
    solver: &mut S,
    mut on_progress: F,
) -> Result<SweepResult, SweepError>
where
    S: Solver + ?Sized,
    F: FnMut(SweepProgress),
{
    config.validate()?;
    let grid = config.grid();
    let total = grid.len();
    let mut entries = Vec::with_capacity(total);

    for (index, u_q) in grid.into_iter().enumerate() {
        on_progress(SweepProgress { index, total, u_q });
        tracing::debug!(index, total, u_q, "solving grid point");

        let output = solver.solve(u_q).inspect_err(|e| {
            tracing::error!(u_q, error = %e, "solver failed, aborting sweep");
        })?;
        entries.push(SweepEntry { u_q, output });
    }

    Ok(SweepResult::from_grid(*config, entries))
}
