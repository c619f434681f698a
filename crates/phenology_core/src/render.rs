//! Data bundles handed to a plotting front-end.
//!
//! Column names are part of the rendering contract and are kept stable:
//! a front-end binds `x_cV` against each date column for the lines and the
//! `*_fill_x` / `*_fill_y` pairs for the patches.

use serde::Serialize;

use crate::series::{DerivedCurves, FillBands};

/// Line series for one parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBundle {
    #[serde(rename = "x_cV")]
    pub x_cv: Vec<f64>,
    pub arrival_date: Vec<f64>,
    pub laying_date: Vec<f64>,
    pub hatching_date: Vec<f64>,
}

impl From<DerivedCurves> for LineBundle {
    fn from(curves: DerivedCurves) -> Self {
        Self {
            x_cv: curves.x,
            arrival_date: curves.arrival,
            laying_date: curves.laying,
            hatching_date: curves.hatching,
        }
    }
}

/// Patch polygons for one parameter value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchBundle {
    pub hatching_fill_x: Vec<f64>,
    pub hatching_fill_y: Vec<f64>,
    pub laying_fill_x: Vec<f64>,
    pub laying_fill_y: Vec<f64>,
    pub arrival_fill_x: Vec<f64>,
    pub arrival_fill_y: Vec<f64>,
}

impl From<FillBands> for PatchBundle {
    fn from(bands: FillBands) -> Self {
        Self {
            hatching_fill_x: bands.hatching.x,
            hatching_fill_y: bands.hatching.y,
            laying_fill_x: bands.laying.x,
            laying_fill_y: bands.laying.y,
            arrival_fill_x: bands.arrival.x,
            arrival_fill_y: bands.arrival.y,
        }
    }
}

/// Everything a front-end needs for one slider position.
///
/// Consumers replace the whole frame at once so the lines and patches never
/// come from different parameter values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub u_q: f64,
    #[serde(skip)]
    pub curves: DerivedCurves,
    #[serde(skip)]
    pub bands: FillBands,
    pub line: LineBundle,
    pub patch: PatchBundle,
}

impl RenderFrame {
    pub fn new(u_q: f64, curves: DerivedCurves, bands: FillBands) -> Self {
        Self {
            u_q,
            line: curves.clone().into(),
            patch: bands.clone().into(),
            curves,
            bands,
        }
    }
}
