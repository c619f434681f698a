use serde::{Deserialize, Serialize};

use super::{SolverOutput, SweepConfig};

/// Solver output for one grid point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEntry {
    pub u_q: f64,
    pub output: SolverOutput,
}

/// Solver outputs for every grid point of a [`SweepConfig`].
///
/// Entries are kept in grid order, so entry `i` belongs to `config.point(i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    config: SweepConfig,
    entries: Vec<SweepEntry>,
}

impl SweepResult {
    /// Pair entries with the config that generated them.
    ///
    /// Returns `None` unless the entry keys are exactly the config's grid.
    pub fn from_entries(config: SweepConfig, entries: Vec<SweepEntry>) -> Option<Self> {
        let grid = config.grid();
        let aligned = grid.len() == entries.len()
            && grid
                .iter()
                .zip(&entries)
                .all(|(point, entry)| point.to_bits() == entry.u_q.to_bits());
        aligned.then_some(Self { config, entries })
    }

    /// Entries produced by walking `config.grid()` in order
    pub(crate) fn from_grid(config: SweepConfig, entries: Vec<SweepEntry>) -> Self {
        debug_assert_eq!(entries.len(), config.point_count());
        Self { config, entries }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    pub fn entries(&self) -> &[SweepEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Grid values in order
    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.u_q)
    }

    /// Output for a grid-aligned parameter value
    pub fn get(&self, u_q: f64) -> Option<&SolverOutput> {
        self.config
            .index_of(u_q)
            .and_then(|i| self.entries.get(i))
            .map(|e| &e.output)
    }
}
