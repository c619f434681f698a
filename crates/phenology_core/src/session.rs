//! The explicitly constructed state behind a visualization session.

use jiff::Timestamp;

use crate::error::{SessionError, SweepError};
use crate::model::{SweepConfig, SweepResult};
use crate::render::RenderFrame;
use crate::series::{derive_bands, derive_curves};
use crate::solver::Solver;
use crate::sweep::{CacheStatus, SweepCache, SweepOutcome, SweepProgress};

/// Sweep results plus where they came from.
///
/// Built once at startup and read-only afterwards; front-ends call
/// [`PhenologySession::frame`] whenever the selected parameter changes.
#[derive(Debug)]
pub struct PhenologySession {
    result: SweepResult,
    status: CacheStatus,
    computed_at: Timestamp,
}

impl PhenologySession {
    /// Load the configured sweep, recomputing it through `solver` if needed.
    ///
    /// A failure to persist a fresh sweep is logged by the cache and does not
    /// prevent the session from opening.
    pub fn open<S, F>(
        cache: &SweepCache,
        solver: &mut S,
        on_progress: F,
    ) -> Result<Self, SweepError>
    where
        S: Solver + ?Sized,
        F: FnMut(SweepProgress),
    {
        let outcome = cache.load_or_compute(solver, on_progress)?;
        Ok(Self::from_outcome(outcome))
    }

    pub fn from_outcome(outcome: SweepOutcome) -> Self {
        Self {
            result: outcome.result,
            status: outcome.status,
            computed_at: outcome.computed_at,
        }
    }

    pub fn config(&self) -> &SweepConfig {
        self.result.config()
    }

    pub fn result(&self) -> &SweepResult {
        &self.result
    }

    pub fn status(&self) -> &CacheStatus {
        &self.status
    }

    pub fn computed_at(&self) -> Timestamp {
        self.computed_at
    }

    /// Derive the curves, bands and both bundles for a grid value
    pub fn frame(&self, u_q: f64) -> Result<RenderFrame, SessionError> {
        let config = self.config();
        let index = config.index_of(u_q).ok_or(SessionError::NotOnGrid {
            u_q,
            min: config.min,
            max: config.max,
            step: config.step,
        })?;
        let entry = &self.result.entries()[index];

        let curves = derive_curves(&entry.output)?;
        let bands = derive_bands(&curves)?;
        tracing::debug!(u_q = entry.u_q, points = curves.len(), "derived render frame");
        Ok(RenderFrame::new(entry.u_q, curves, bands))
    }
}
