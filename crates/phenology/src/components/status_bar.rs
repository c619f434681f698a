use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::styles::HELP_COLOR;
use crossterm::event::KeyEvent;
use phenology_core::CacheStatus;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP_TEXT: &str = "←/h →/l: step | Home/End: bounds | Esc: clear | q: quit";

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    /// Where the sweep came from and when it was computed
    pub fn origin_text(state: &AppState) -> String {
        let session = &state.session;
        let origin = match session.status() {
            CacheStatus::Loaded => "cached sweep".to_string(),
            CacheStatus::Recomputed(reason) => format!("recomputed ({reason})"),
        };
        format!(
            "{origin}, {} points, computed {}",
            session.result().len(),
            session.computed_at().strftime("%Y-%m-%d %H:%M UTC")
        )
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red)),
                Span::raw(error),
            ])
        } else {
            Line::from(vec![
                Span::raw(Self::origin_text(state)),
                Span::styled(format!(" | {HELP_TEXT}"), Style::default().fg(HELP_COLOR)),
            ])
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
