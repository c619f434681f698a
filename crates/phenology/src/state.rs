use phenology_core::{PhenologySession, RenderFrame, SweepConfig};

use crate::config::ViewSettings;

/// Everything the UI reads from and the components mutate
#[derive(Debug)]
pub struct AppState {
    pub session: PhenologySession,
    pub view: ViewSettings,
    /// Grid index the slider points at
    pub slider_index: usize,
    /// Last successfully derived frame; replaced whole, never patched
    pub frame: Option<RenderFrame>,
    pub error_message: Option<String>,
    pub exit: bool,
}

impl AppState {
    /// Start with the slider at `min` and its frame already derived
    pub fn new(session: PhenologySession, view: ViewSettings) -> Self {
        let mut state = Self {
            session,
            view,
            slider_index: 0,
            frame: None,
            error_message: None,
            exit: false,
        };
        state.select(0);
        state
    }

    pub fn config(&self) -> &SweepConfig {
        self.session.config()
    }

    /// Parameter value under the slider
    pub fn selected_u_q(&self) -> f64 {
        self.config().point(self.slider_index)
    }

    pub fn last_index(&self) -> usize {
        self.config().point_count().saturating_sub(1)
    }

    /// Move the slider to `index` and re-derive.
    ///
    /// On failure the previous frame stays on screen and the error goes to
    /// the status bar.
    pub fn select(&mut self, index: usize) {
        let index = index.min(self.last_index());
        self.slider_index = index;
        let u_q = self.selected_u_q();

        match self.session.frame(u_q) {
            Ok(frame) => {
                self.frame = Some(frame);
                self.clear_error();
            }
            Err(e) => {
                tracing::warn!(u_q, error = %e, "could not derive frame");
                self.set_error(format!("u_q = {u_q}: {e}"));
            }
        }
    }

    pub fn step_by(&mut self, delta: isize) {
        let index = self
            .slider_index
            .saturating_add_signed(delta)
            .min(self.last_index());
        if index != self.slider_index {
            self.select(index);
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedSolver, small_session};
    use tempfile::tempdir;

    #[test]
    fn test_starts_at_min_with_a_frame() {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            small_session(dir.path(), &mut FixedSolver::new()),
            ViewSettings::default(),
        );
        assert_eq!(state.slider_index, 0);
        assert_eq!(state.selected_u_q(), 125.0);
        assert_eq!(state.frame.as_ref().map(|f| f.u_q), Some(125.0));
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_stepping_is_bounded() {
        let dir = tempdir().unwrap();
        let mut state = AppState::new(
            small_session(dir.path(), &mut FixedSolver::new()),
            ViewSettings::default(),
        );

        state.step_by(-1);
        assert_eq!(state.slider_index, 0);

        for _ in 0..5 {
            state.step_by(1);
        }
        assert_eq!(state.slider_index, 2);
        assert_eq!(state.frame.as_ref().map(|f| f.u_q), Some(127.0));
    }

    #[test]
    fn test_failed_derivation_keeps_previous_frame() {
        let dir = tempdir().unwrap();
        let mut state = AppState::new(
            small_session(dir.path(), &mut FixedSolver::bad_shape_at(126.0)),
            ViewSettings::default(),
        );

        state.step_by(1);
        assert_eq!(state.slider_index, 1);
        assert_eq!(state.frame.as_ref().map(|f| f.u_q), Some(125.0));
        assert!(state.error_message.is_some());

        state.step_by(1);
        assert_eq!(state.frame.as_ref().map(|f| f.u_q), Some(127.0));
        assert!(state.error_message.is_none());
    }
}
