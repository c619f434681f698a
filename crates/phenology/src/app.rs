use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use phenology_core::PhenologySession;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::components::{
    Component, EventResult, chart::PhenologyChart, slider::ParameterSlider, status_bar::StatusBar,
};
use crate::config::ViewSettings;
use crate::state::AppState;

pub struct App {
    state: AppState,
    chart: PhenologyChart,
    slider: ParameterSlider,
    status_bar: StatusBar,
}

impl App {
    pub fn new(session: PhenologySession, view: ViewSettings) -> Self {
        Self {
            state: AppState::new(session, view),
            chart: PhenologyChart::new(),
            slider: ParameterSlider::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Chart and legend
                Constraint::Length(3), // Slider
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.chart.render(frame, chunks[0], &self.state);
        self.slider.render(frame, chunks[1], &self.state);
        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn handle_events(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.exit = true;
                return;
            }
            KeyCode::Esc => {
                self.state.clear_error();
                return;
            }
            _ => {}
        }

        let result = self.slider.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        if self.chart.handle_key(key_event, &mut self.state) == EventResult::Exit {
            self.state.exit = true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedSolver, small_session};
    use tempfile::tempdir;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_keys_drive_the_slider() {
        let dir = tempdir().unwrap();
        let session = small_session(dir.path(), &mut FixedSolver::new());
        let mut app = App::new(session, ViewSettings::default());

        press(&mut app, KeyCode::Right);
        assert_eq!(app.state().selected_u_q(), 126.0);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.state().selected_u_q(), 127.0);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.state().selected_u_q(), 125.0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.state().selected_u_q(), 127.0);
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.state().selected_u_q(), 126.0);
        assert!(!app.state().exit);
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempdir().unwrap();
        let mut app = App::new(
            small_session(dir.path(), &mut FixedSolver::new()),
            ViewSettings::default(),
        );
        press(&mut app, KeyCode::Char('q'));
        assert!(app.state().exit);

        let mut app = App::new(
            small_session(dir.path(), &mut FixedSolver::new()),
            ViewSettings::default(),
        );
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.state().exit);
    }
}
