//! Curves and shaded bands derived from one solver output.
//!
//! Everything here is pure: the same [`SolverOutput`] always yields the same
//! curves, and shape problems are reported rather than patched up.

use serde::Serialize;

use crate::error::ShapeError;
use crate::model::{NumericArray, SolverOutput};

/// Arrival, laying and hatching dates over the shared coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCurves {
    pub x: Vec<f64>,
    pub arrival: Vec<f64>,
    pub laying: Vec<f64>,
    pub hatching: Vec<f64>,
}

impl DerivedCurves {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// A closed polygon: boundary A forward, then boundary B reversed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillRegion {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl FillRegion {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// The three shaded bands for one parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillBands {
    /// Identity line up to the hatching date
    pub hatching: FillRegion,
    /// Identity line up to the laying date
    pub laying: FillRegion,
    /// Laying date down to the arrival date
    pub arrival: FillRegion,
}

/// Band identity, in draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Hatching,
    Laying,
    Arrival,
}

impl Band {
    pub const DRAW_ORDER: [Band; 3] = [Band::Hatching, Band::Laying, Band::Arrival];

    pub fn name(self) -> &'static str {
        match self {
            Band::Hatching => "hatching",
            Band::Laying => "laying",
            Band::Arrival => "arrival",
        }
    }
}

impl FillBands {
    pub fn get(&self, band: Band) -> &FillRegion {
        match band {
            Band::Hatching => &self.hatching,
            Band::Laying => &self.laying,
            Band::Arrival => &self.arrival,
        }
    }

    /// Bands bottom to top: hatching, laying, arrival
    pub fn in_draw_order(&self) -> [(Band, &FillRegion); 3] {
        Band::DRAW_ORDER.map(|band| (band, self.get(band)))
    }
}

/// Derive the three date curves from one solver output.
///
/// - coordinate: row 0 of `x_cV`
/// - arrival: `yzV[i][0]`
/// - laying: `yzV[i][0] + yzV[i][1]`
/// - hatching: laying plus `z_n`, broadcast per row
pub fn derive_curves(output: &SolverOutput) -> Result<DerivedCurves, ShapeError> {
    let x = output.x_cv.row(0).unwrap_or_default();
    let offsets = offset_rows(&output.yz_v)?;

    if x.len() != offsets.len() {
        return Err(ShapeError::LengthMismatch {
            what: "coordinate row vs offset rows",
            expected: offsets.len(),
            found: x.len(),
        });
    }

    let adjustment = broadcast_adjustment(&output.z_n, offsets.len())?;

    let arrival: Vec<f64> = offsets.iter().map(|row| row[0]).collect();
    let laying: Vec<f64> = offsets.iter().map(|row| row[0] + row[1]).collect();
    let hatching: Vec<f64> = laying
        .iter()
        .zip(&adjustment)
        .map(|(laying, adjust)| laying + adjust)
        .collect();

    Ok(DerivedCurves {
        x,
        arrival,
        laying,
        hatching,
    })
}

/// Rows of the offset array, each exactly `[arrival, laying delay]`
fn offset_rows(yz_v: &NumericArray) -> Result<Vec<&[f64]>, ShapeError> {
    let rows: Vec<&[f64]> = match yz_v {
        NumericArray::Scalar(_) => return Err(ShapeError::OffsetColumns { found: 1 }),
        NumericArray::Vector(values) => vec![values.as_slice()],
        NumericArray::Matrix(rows) => rows.iter().map(Vec::as_slice).collect(),
    };
    if let Some(row) = rows.iter().find(|row| row.len() != 2) {
        return Err(ShapeError::OffsetColumns { found: row.len() });
    }
    Ok(rows)
}

/// Expand `z_n` to one value per offset row.
///
/// A scalar (or any one-element array) applies to every row; a vector or
/// single row/column matrix must have exactly `rows` elements.
fn broadcast_adjustment(z_n: &NumericArray, rows: usize) -> Result<Vec<f64>, ShapeError> {
    let shape = z_n.shape();
    match z_n {
        NumericArray::Scalar(v) => Ok(vec![*v; rows]),
        _ if z_n.len() == 1 => Ok(vec![z_n.flatten()[0]; rows]),
        _ if (shape.0 == 1 || shape.1 == 1) && z_n.len() == rows => Ok(z_n.flatten()),
        _ => Err(ShapeError::Adjustment { rows, shape }),
    }
}

/// Close a polygon between two boundaries.
///
/// Walks (xa, ya) forward and then (xb, yb) backward, giving `2 * xa.len()`
/// points. All four inputs must have the same length.
pub fn build_fill_region(
    xa: &[f64],
    ya: &[f64],
    xb: &[f64],
    yb: &[f64],
) -> Result<FillRegion, ShapeError> {
    let n = xa.len();
    for (what, len) in [
        ("fill boundary ya", ya.len()),
        ("fill boundary xb", xb.len()),
        ("fill boundary yb", yb.len()),
    ] {
        if len != n {
            return Err(ShapeError::LengthMismatch {
                what,
                expected: n,
                found: len,
            });
        }
    }

    let x = xa.iter().chain(xb.iter().rev()).copied().collect();
    let y = ya.iter().chain(yb.iter().rev()).copied().collect();
    Ok(FillRegion { x, y })
}

/// Build the hatching, laying and arrival bands for a set of curves
pub fn derive_bands(curves: &DerivedCurves) -> Result<FillBands, ShapeError> {
    let x = &curves.x;
    let hatching = build_fill_region(x, x, x, &curves.hatching)?;
    let laying = build_fill_region(x, x, x, &curves.laying)?;
    let arrival = build_fill_region(x, &curves.laying, x, &curves.arrival)?;
    Ok(FillBands {
        hatching,
        laying,
        arrival,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fill_region_walks_back() {
        let region =
            build_fill_region(&[1.0, 2.0], &[10.0, 20.0], &[1.0, 2.0], &[5.0, 6.0]).unwrap();
        assert_eq!(region.x, vec![1.0, 2.0, 2.0, 1.0]);
        assert_eq!(region.y, vec![10.0, 20.0, 6.0, 5.0]);
    }

    #[test]
    fn test_build_fill_region_rejects_mismatch() {
        let err = build_fill_region(&[1.0, 2.0], &[1.0, 2.0], &[1.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::LengthMismatch {
                what: "fill boundary xb",
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_broadcast_adjustment_shapes() {
        assert_eq!(
            broadcast_adjustment(&NumericArray::Scalar(2.0), 3).unwrap(),
            vec![2.0; 3]
        );
        let column = NumericArray::Matrix(vec![vec![1.0], vec![2.0], vec![3.0]]);
        assert_eq!(broadcast_adjustment(&column, 3).unwrap(), vec![1.0, 2.0, 3.0]);

        let square = NumericArray::Matrix(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(
            broadcast_adjustment(&square, 4),
            Err(ShapeError::Adjustment {
                rows: 4,
                shape: (2, 2)
            })
        );
    }

    #[test]
    fn test_band_draw_order() {
        assert_eq!(
            Band::DRAW_ORDER.map(Band::name),
            ["hatching", "laying", "arrival"]
        );
    }
}
