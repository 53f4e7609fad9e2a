//! Process-wide document state
//!
//! Export entry points consult the active [`Theme`] when resolving unset
//! styling attributes. State is an ordinary value type; the process-wide
//! instance used by the plain export functions lives behind [`state()`].

use std::sync::{Mutex, OnceLock};

use log::debug;

use crate::model::Theme;

/// Mutable document state consulted while resolving a layout.
#[derive(Debug, Default)]
pub struct State {
    theme: Theme,
}

impl State {
    pub fn new() -> Self {
        State::default()
    }

    /// Replace the active document theme.
    pub fn set_theme(&mut self, theme: Theme) {
        debug!("document theme replaced");
        self.theme = theme;
    }

    /// The active document theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Restore the default (empty) state.
    pub fn reset(&mut self) {
        self.theme = Theme::default();
    }
}

static STATE: OnceLock<Mutex<State>> = OnceLock::new();

/// The process-wide state instance, created lazily.
pub fn state() -> &'static Mutex<State> {
    STATE.get_or_init(|| Mutex::new(State::new()))
}
