//! Application state and routing.
//!
//! ```text
//! AppState
//! ├── screen: ActiveScreen   (presenter for the current route)
//! ├── history: Vec<Route>    (back stack; routes only, never presenter state)
//! ├── screen_seq: ScreenSeq  (ScreenId generator)
//! ├── keymap / theme         (built once from config)
//! └── size, spinner_frame, status
//! ```
//!
//! Navigating always builds a fresh presenter in `Loading`; going back
//! rebuilds the previous route from scratch.

use trackdash_core::config::Config;

use crate::command::KeyMap;
use crate::effects::UiEffect;
use crate::layout::ScreenLayout;
use crate::screens::{ActiveScreen, Route, ScreenSeq};
use crate::theme::Theme;

pub struct AppState {
    pub should_quit: bool,
    pub screen: ActiveScreen,
    pub history: Vec<Route>,
    pub screen_seq: ScreenSeq,
    pub keymap: KeyMap,
    pub theme: Theme,
    /// Last known terminal size.
    pub size: (u16, u16),
    pub spinner_frame: usize,
    /// One-shot message for the footer, cleared on the next key.
    pub status: Option<String>,
}

impl AppState {
    /// Creates the state for `route` and the effect that loads it.
    pub fn new(config: &Config, route: Route) -> (Self, Vec<UiEffect>) {
        let mut screen_seq = ScreenSeq::default();
        let (screen, load) = ActiveScreen::open(screen_seq.next_id(), route);
        let state = Self {
            should_quit: false,
            screen,
            history: Vec::new(),
            screen_seq,
            keymap: KeyMap::new(config.ui.vim_keys),
            theme: Theme::new(&config.theme, &config.ui),
            size: (0, 0),
            spinner_frame: 0,
            status: None,
        };
        (state, vec![load])
    }

    /// Content `(width, height)` available to a screen showing `route`.
    pub fn content_size(&self, route: &Route) -> (usize, usize) {
        let (width, height) = self.size;
        ScreenLayout::content_size(width, height, route.has_tabs())
    }

    /// Opens `route`, remembering the current one for `back`.
    pub fn navigate(&mut self, route: Route) -> Vec<UiEffect> {
        tracing::debug!(from = ?self.screen.route, to = ?route, "navigate");
        let current = self.screen.route.clone();
        self.history.push(current);
        self.replace_screen(route)
    }

    /// Returns to the previous route. A no-op at the root.
    pub fn back(&mut self) -> Vec<UiEffect> {
        let Some(route) = self.history.pop() else {
            tracing::debug!("back at root ignored");
            return Vec::new();
        };
        tracing::debug!(to = ?route, "back");
        self.replace_screen(route)
    }

    /// Reloads the current route with a new presenter, leaving history alone.
    pub fn retry(&mut self) -> Vec<UiEffect> {
        let route = self.screen.route.clone();
        tracing::debug!(route = ?route, "retry");
        self.replace_screen(route)
    }

    /// Jumps to a top-level route, clearing history.
    pub fn go_root(&mut self, route: Route) -> Vec<UiEffect> {
        if self.screen.route == route && self.history.is_empty() {
            return Vec::new();
        }
        self.history.clear();
        self.replace_screen(route)
    }

    fn replace_screen(&mut self, route: Route) -> Vec<UiEffect> {
        let (screen, load) = ActiveScreen::open(self.screen_seq.next_id(), route);
        let old = std::mem::replace(&mut self.screen, screen);

        let mut effects = Vec::with_capacity(2);
        if old.is_loading() {
            effects.push(UiEffect::CancelLoad { cancel: old.cancel });
        }
        effects.push(load);
        effects
    }
}
