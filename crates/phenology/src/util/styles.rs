//! Colours shared by the chart, its legend and the status bar

use phenology_core::Band;
use ratatui::prelude::*;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// Identity line `y = x`
pub const IDENTITY_COLOR: Color = Color::White;

pub const ARRIVAL_COLOR: Color = Color::Magenta;
pub const LAYING_COLOR: Color = Color::Red;
pub const HATCHING_COLOR: Color = Color::Green;

/// Band fills go from dark (hatching) to light (arrival) so the later,
/// narrower bands stay visible on top.
pub fn band_fill(band: Band) -> Color {
    match band {
        Band::Hatching => Color::Rgb(0x3a, 0x3a, 0x3a),
        Band::Laying => Color::Rgb(0x69, 0x69, 0x69),
        Band::Arrival => Color::Rgb(0xa9, 0xa9, 0xa9),
    }
}

/// Line colour for the curve bounding a band
pub fn band_line(band: Band) -> Color {
    match band {
        Band::Hatching => HATCHING_COLOR,
        Band::Laying => LAYING_COLOR,
        Band::Arrival => ARRIVAL_COLOR,
    }
}
