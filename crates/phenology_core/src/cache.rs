//! On-disk memoization of a complete sweep.
//!
//! The cache is one JSON document holding the range, the grid and every
//! solver output. Floats are written shortest-round-trip and parsed with
//! exact rounding, so a loaded sweep is bit-identical to the one saved.

use std::fs;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::io::atomic_write_bytes;
use crate::model::{SweepConfig, SweepEntry, SweepResult};

/// Bumped whenever the persisted layout changes
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Default cache file name, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "arrival_times.json";

/// The persisted (config, result) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSweep {
    pub version: u32,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub grid: Vec<f64>,
    pub entries: Vec<SweepEntry>,
    pub computed_at: Timestamp,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl PersistedSweep {
    pub fn new(result: &SweepResult, computed_at: Timestamp) -> Self {
        let config = result.config();
        Self {
            version: CACHE_FORMAT_VERSION,
            min: config.min,
            max: config.max,
            step: config.step,
            grid: result.keys().collect(),
            entries: result.entries().to_vec(),
            computed_at,
        }
    }

    /// The range this sweep was computed for
    pub fn config(&self) -> SweepConfig {
        SweepConfig {
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CacheError> {
        serde_json::to_vec(self).map_err(CacheError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CacheError> {
        let probe: VersionProbe = serde_json::from_slice(bytes).map_err(CacheError::Decode)?;
        if probe.version != CACHE_FORMAT_VERSION {
            return Err(CacheError::Version {
                found: probe.version,
                expected: CACHE_FORMAT_VERSION,
            });
        }
        serde_json::from_slice(bytes).map_err(CacheError::Decode)
    }

    /// Check the record against its own range and hand back the result.
    ///
    /// The stored grid and entry keys must both equal the grid the stored
    /// range generates; anything else is treated as corruption.
    pub fn into_result(self) -> Result<SweepResult, CacheError> {
        let config = self.config();
        config
            .validate()
            .map_err(|e| CacheError::Schema(e.to_string()))?;

        let expected = config.grid();
        let grid_matches = expected.len() == self.grid.len()
            && expected
                .iter()
                .zip(&self.grid)
                .all(|(a, b)| a.to_bits() == b.to_bits());
        if !grid_matches {
            return Err(CacheError::Schema(format!(
                "stored grid has {} points, range generates {}",
                self.grid.len(),
                expected.len()
            )));
        }

        let entry_count = self.entries.len();
        SweepResult::from_entries(config, self.entries).ok_or_else(|| {
            CacheError::Schema(format!(
                "{entry_count} entries do not match the {} grid points",
                expected.len()
            ))
        })
    }
}

/// The cache file at a fixed location
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `arrival_times.json` in the current working directory
    pub fn in_working_dir() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<PersistedSweep, CacheError> {
        let bytes = fs::read(&self.path)?;
        PersistedSweep::from_bytes(&bytes)
    }

    /// Replace any previous file with `sweep`
    pub fn save(&self, sweep: &PersistedSweep) -> Result<(), CacheError> {
        let bytes = sweep.to_bytes()?;
        atomic_write_bytes(&self.path, &bytes)?;
        tracing::info!(
            path = %self.path.display(),
            entries = sweep.entries.len(),
            "sweep cache written"
        );
        Ok(())
    }
}
