//! Sweep range and grid generation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Slack added before flooring the point count so that ranges like
/// `0.0..=0.3 step 0.1` keep their last point.
const GRID_EPSILON: f64 = 1e-9;

/// Relative tolerance (in steps) for matching a value to a grid point
pub const GRID_LOOKUP_TOLERANCE: f64 = 1e-6;

/// Largest grid a sweep may cover; each point is one solver call
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// The parameter range swept by the solver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min: 125.0,
            max: 140.0,
            step: 1.0,
        }
    }
}

impl SweepConfig {
    /// Build a validated config
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let config = Self { min, max, step };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("min", self.min), ("max", self.max), ("step", self.step)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::NonPositiveStep(self.step));
        }
        let count = self.raw_point_count();
        if count.is_nan() || count > MAX_GRID_POINTS as f64 {
            return Err(ConfigError::TooManyPoints {
                count,
                limit: MAX_GRID_POINTS,
            });
        }
        Ok(())
    }

    fn raw_point_count(&self) -> f64 {
        ((self.max - self.min) / self.step + GRID_EPSILON).floor() + 1.0
    }

    /// Number of grid points: `floor((max - min) / step) + 1`.
    ///
    /// Saturates to `1..=MAX_GRID_POINTS` so an unvalidated config never
    /// overflows.
    pub fn point_count(&self) -> usize {
        self.raw_point_count()
            .max(1.0)
            .min(MAX_GRID_POINTS as f64) as usize
    }

    /// The i-th grid point, computed multiplicatively so write and read
    /// paths always agree bit for bit.
    pub fn point(&self, index: usize) -> f64 {
        (self.min + index as f64 * self.step).min(self.max)
    }

    /// All grid points from `min` up to (and possibly including) `max`
    pub fn grid(&self) -> Vec<f64> {
        (0..self.point_count()).map(|i| self.point(i)).collect()
    }

    /// Index of the grid point matching `u_q`, if any
    pub fn index_of(&self, u_q: f64) -> Option<usize> {
        if !u_q.is_finite() {
            return None;
        }
        let position = ((u_q - self.min) / self.step).round();
        if position < 0.0 || position >= self.point_count() as f64 {
            return None;
        }
        let index = position as usize;
        let tolerance = self.step * GRID_LOOKUP_TOLERANCE;
        ((self.point(index) - u_q).abs() <= tolerance).then_some(index)
    }

    /// Exact comparison of the three bounds, used for cache invalidation
    pub fn same_range(&self, other: &SweepConfig) -> bool {
        self.min == other.min && self.max == other.max && self.step == other.step
    }
}
