use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{HELP_COLOR, IDENTITY_COLOR, band_fill, band_line};
use crossterm::event::KeyEvent;
use phenology_core::{Band, DerivedCurves, FillRegion};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Paragraph,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};

/// Braille cells hold a 2x4 dot grid
const DOTS_PER_COLUMN: usize = 2;
const DOTS_PER_ROW: usize = 4;

/// Curves in legend order, earliest date first
const CURVE_ORDER: [Band; 3] = [Band::Arrival, Band::Laying, Band::Hatching];

/// Shaded phenology bands with the date curves drawn over them
pub struct PhenologyChart;

impl PhenologyChart {
    pub fn new() -> Self {
        Self
    }

    fn legend() -> Line<'static> {
        let entry = |color: Color, name: &'static str| {
            [
                Span::styled(" ── ", Style::default().fg(color)),
                Span::raw(name),
            ]
        };

        let bands = CURVE_ORDER.map(|band| entry(band_line(band), band.name()));
        Line::from(
            std::iter::once(entry(IDENTITY_COLOR, "x = y"))
                .chain(bands)
                .flatten()
                .collect::<Vec<_>>(),
        )
    }
}

impl Default for PhenologyChart {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PhenologyChart {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let [plot_area, legend_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        frame.render_widget(Self::legend(), legend_area);

        let (x0, x1) = state.view.x_range;
        let (y0, y1) = state.view.y_range;
        let ranges = Line::from(format!(" x {x0}..{x1}  y {y0}..{y1} ")).fg(HELP_COLOR);

        let Some(rendered) = &state.frame else {
            let block = Block::bordered().title(" Phenology ").title_bottom(ranges);
            let placeholder = Paragraph::new("No data for this parameter").block(block);
            frame.render_widget(placeholder, plot_area);
            return;
        };

        let block = Block::bordered()
            .title(format!(" Phenology at u_q = {} ", rendered.u_q))
            .title_bottom(ranges);
        let inner = block.inner(plot_area);
        let x_bounds = [x0, x1];
        let y_bounds = [y0, y1];

        let fills: Vec<(Color, Vec<(f64, f64)>)> = rendered
            .bands
            .in_draw_order()
            .into_iter()
            .map(|(band, region)| {
                let points = rasterize(
                    region,
                    x_bounds,
                    y_bounds,
                    inner.width as usize * DOTS_PER_COLUMN,
                    inner.height as usize * DOTS_PER_ROW,
                );
                (band_fill(band), points)
            })
            .collect();
        let curves = &rendered.curves;

        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for (color, points) in &fills {
                    ctx.draw(&Points {
                        coords: points,
                        color: *color,
                    });
                    ctx.layer();
                }
                draw_polyline(ctx, &curves.x, &curves.x, IDENTITY_COLOR);
                for band in CURVE_ORDER {
                    draw_polyline(ctx, &curves.x, band_curve(curves, band), band_line(band));
                }
            });

        frame.render_widget(canvas, plot_area);
    }
}

/// The date curve bounding `band` from above
fn band_curve(curves: &DerivedCurves, band: Band) -> &[f64] {
    match band {
        Band::Arrival => &curves.arrival,
        Band::Laying => &curves.laying,
        Band::Hatching => &curves.hatching,
    }
}

fn draw_polyline(ctx: &mut Context<'_>, xs: &[f64], ys: &[f64], color: Color) {
    for (x, y) in xs.windows(2).zip(ys.windows(2)) {
        ctx.draw(&CanvasLine::new(x[0], y[0], x[1], y[1], color));
    }
}

/// Sample a `cols` x `rows` lattice over the plot bounds and keep the
/// cell centres that fall inside `region`.
pub fn rasterize(
    region: &FillRegion,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    cols: usize,
    rows: usize,
) -> Vec<(f64, f64)> {
    if region.len() < 3 || cols == 0 || rows == 0 {
        return Vec::new();
    }

    let dx = (x_bounds[1] - x_bounds[0]) / cols as f64;
    let dy = (y_bounds[1] - y_bounds[0]) / rows as f64;
    let (min_x, max_x) = min_max(&region.x);
    let (min_y, max_y) = min_max(&region.y);

    let mut points = Vec::new();
    for c in 0..cols {
        let x = x_bounds[0] + (c as f64 + 0.5) * dx;
        if x < min_x || x > max_x {
            continue;
        }
        for r in 0..rows {
            let y = y_bounds[0] + (r as f64 + 0.5) * dy;
            if y >= min_y && y <= max_y && contains(region, x, y) {
                points.push((x, y));
            }
        }
    }
    points
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Even-odd rule
fn contains(region: &FillRegion, px: f64, py: f64) -> bool {
    let n = region.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (region.x[i], region.y[i]);
        let (xj, yj) = (region.x[j], region.y[j]);
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use phenology_core::build_fill_region;

    fn square() -> FillRegion {
        // (0,0) -> (10,0) forward, then (10,10) -> (0,10) reversed
        build_fill_region(&[0.0, 10.0], &[0.0, 0.0], &[0.0, 10.0], &[10.0, 10.0]).unwrap()
    }

    #[test]
    fn test_contains_square() {
        let region = square();
        assert!(contains(&region, 5.0, 5.0));
        assert!(contains(&region, 0.5, 9.5));
        assert!(!contains(&region, 11.0, 5.0));
        assert!(!contains(&region, 5.0, -1.0));
    }

    #[test]
    fn test_rasterize_counts_inside_cells() {
        // 20x20 lattice over [0, 20]: the square covers the lower-left quarter
        let points = rasterize(&square(), [0.0, 20.0], [0.0, 20.0], 20, 20);
        assert_eq!(points.len(), 100);
        assert!(points.iter().all(|&(x, y)| x < 10.0 && y < 10.0));
    }

    #[test]
    fn test_band_between_identity_and_curve() {
        // Identity line from 0 to 10 with the curve flat at 10 above it
        let x = [0.0, 10.0];
        let region = build_fill_region(&x, &x, &x, &[10.0, 10.0]).unwrap();
        assert!(contains(&region, 2.0, 8.0));
        assert!(!contains(&region, 8.0, 2.0));
    }

    #[test]
    fn test_legend_matches_curve_colours() {
        let legend = PhenologyChart::legend();
        let names: Vec<&str> = legend
            .spans
            .iter()
            .skip(1)
            .step_by(2)
            .map(|s| &*s.content)
            .collect();
        assert_eq!(names, ["x = y", "arrival", "laying", "hatching"]);

        let colours: Vec<Option<Color>> =
            legend.spans.iter().step_by(2).map(|s| s.style.fg).collect();
        assert_eq!(colours[0], Some(IDENTITY_COLOR));
        for (i, band) in CURVE_ORDER.into_iter().enumerate() {
            assert_eq!(colours[i + 1], Some(band_line(band)));
        }
        assert_ne!(band_line(Band::Arrival), band_line(Band::Hatching));
    }

    #[test]
    fn test_degenerate_region_is_empty() {
        let region = build_fill_region(&[1.0], &[1.0], &[1.0], &[2.0]).unwrap();
        assert!(rasterize(&region, [0.0, 5.0], [0.0, 5.0], 10, 10).is_empty());
        assert!(rasterize(&square(), [0.0, 20.0], [0.0, 20.0], 0, 10).is_empty());
    }
}
