//! Screen parts: the band chart, the u_q slider and the status bar.

pub mod chart;
pub mod slider;
pub mod status_bar;

use crate::state::AppState;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

/// What a component did with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Handled,
    /// Offer the key to the next component
    NotHandled,
    Exit,
}

/// A piece of the screen that draws from [`AppState`] and may react to keys
pub trait Component {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult;

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState);
}
