//! Shape-preserving numeric values pulled from the solver namespace.

use serde::{Deserialize, Serialize};

/// A numeric solver variable in the shape the solver produced it.
///
/// Serialized untagged so that the on-disk form is the same nested-array
/// JSON the solver emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericArray {
    Scalar(f64),
    /// A 1-D vector; treated as a single row
    Vector(Vec<f64>),
    /// Row-major rows of equal length
    Matrix(Vec<Vec<f64>>),
}

impl NumericArray {
    /// (rows, columns), with a vector counted as one row
    pub fn shape(&self) -> (usize, usize) {
        match self {
            NumericArray::Scalar(_) => (1, 1),
            NumericArray::Vector(values) => (1, values.len()),
            NumericArray::Matrix(rows) => (rows.len(), rows.first().map_or(0, Vec::len)),
        }
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        let (rows, cols) = self.shape();
        rows * cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_rectangular(&self) -> bool {
        match self {
            NumericArray::Matrix(rows) => {
                let width = rows.first().map_or(0, Vec::len);
                rows.iter().all(|row| row.len() == width)
            }
            _ => true,
        }
    }

    /// Row `index` as a slice-backed copy
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        match self {
            NumericArray::Scalar(v) => (index == 0).then(|| vec![*v]),
            NumericArray::Vector(values) => (index == 0).then(|| values.clone()),
            NumericArray::Matrix(rows) => rows.get(index).cloned(),
        }
    }

    /// Elements in row-major order
    pub fn flatten(&self) -> Vec<f64> {
        match self {
            NumericArray::Scalar(v) => vec![*v],
            NumericArray::Vector(values) => values.clone(),
            NumericArray::Matrix(rows) => rows.iter().flatten().copied().collect(),
        }
    }
}

impl From<f64> for NumericArray {
    fn from(value: f64) -> Self {
        NumericArray::Scalar(value)
    }
}

impl From<Vec<f64>> for NumericArray {
    fn from(values: Vec<f64>) -> Self {
        NumericArray::Vector(values)
    }
}

impl From<Vec<Vec<f64>>> for NumericArray {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        NumericArray::Matrix(rows)
    }
}
