/// Screens of the dashboard
///
/// Each screen owns its state for one activation, turns key presses into
/// `Action`s and knows how to draw itself.
pub mod detail;
pub mod list;

use crate::routes::Route;
use crate::services::{Activation, FetchOutcome};
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use ratatui::Frame;

pub use detail::{render_detail, DetailScreen};
pub use list::{render_list, ListScreen};

/// What the application should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Navigate(Route),
    /// Start a fresh activation of the current route
    Reload,
}

pub enum Screen {
    List(ListScreen),
    Detail(DetailScreen),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::List(_) => Route::ShipList,
            Screen::Detail(screen) => Route::ship(screen.id()),
        }
    }

    pub fn activation(&self) -> &Activation {
        match self {
            Screen::List(screen) => screen.activation(),
            Screen::Detail(screen) => screen.activation(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self {
            Screen::List(screen) => screen.handle_key(key),
            Screen::Detail(screen) => screen.handle_key(key),
        }
    }

    /// Commit a fetch result addressed to this activation; false if it does not belong here
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.activation() != self.activation().id() {
            return false;
        }
        match (self, outcome) {
            (Screen::List(screen), FetchOutcome::Ships { result, .. }) => {
                screen.fetch.resolve(result)
            }
            (Screen::Detail(screen), FetchOutcome::Ship { id, result, .. }) if id == screen.id() => {
                screen.fetch.resolve(result)
            }
            _ => false,
        }
    }

    pub fn render(&self, f: &mut Frame, theme: &Theme) {
        match self {
            Screen::List(screen) => render_list(f, screen, theme),
            Screen::Detail(screen) => render_detail(f, screen, theme),
        }
    }
}
