use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::{HEADER_COLOR, HELP_COLOR};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, LineGauge},
};

/// Single slider over the sweep grid, from `min` to `max` in `step` increments
pub struct ParameterSlider;

impl ParameterSlider {
    pub fn new() -> Self {
        Self
    }

    /// Position of `index` along the track, `0.0..=1.0`
    pub fn ratio(index: usize, last_index: usize) -> f64 {
        if last_index == 0 {
            return 1.0;
        }
        (index as f64 / last_index as f64).clamp(0.0, 1.0)
    }
}

impl Default for ParameterSlider {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ParameterSlider {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => state.step_by(-1),
            KeyCode::Right | KeyCode::Char('l') => state.step_by(1),
            KeyCode::Home => state.select(0),
            KeyCode::End => state.select(state.last_index()),
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let config = state.config();
        let last = state.last_index();

        let block = Block::bordered().title(" u_q ").title_bottom(
            Line::from(format!(
                " {} .. {} step {} ({}/{}) ",
                config.min,
                config.max,
                config.step,
                state.slider_index + 1,
                last + 1
            ))
            .fg(HELP_COLOR),
        );

        let gauge = LineGauge::default()
            .block(block)
            .filled_style(Style::default().fg(HEADER_COLOR))
            .ratio(Self::ratio(state.slider_index, last))
            .label(format!("{:>8} ", state.selected_u_q()));

        frame.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_spans_track() {
        assert_eq!(ParameterSlider::ratio(0, 15), 0.0);
        assert_eq!(ParameterSlider::ratio(15, 15), 1.0);
        assert_eq!(ParameterSlider::ratio(5, 10), 0.5);
    }

    #[test]
    fn test_single_point_is_full() {
        assert_eq!(ParameterSlider::ratio(0, 0), 1.0);
    }
}
