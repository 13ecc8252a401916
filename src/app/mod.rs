/// Application state machine: current screen, navigation and fetch dispatch
use crate::routes::Route;
use crate::screens::{Action, DetailScreen, ListScreen, Screen};
use crate::services::{FetchOutcome, FleetService};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tracing::{debug, info};

pub struct App {
    screen: Screen,
    service: FleetService,
    page_size: usize,
    theme: Theme,
    pub should_quit: bool,
}

impl App {
    /// Start on `route`; its fetch is spawned immediately
    pub fn new(service: FleetService, page_size: usize, route: Route) -> Self {
        let screen = activate(&service, page_size, route);
        Self {
            screen,
            service,
            page_size,
            theme: Theme::default(),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Replace the current screen. The old activation is dropped, so its pending fetch is discarded.
    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.screen.route(), to = %route, "Navigating");
        self.screen = activate(&self.service, self.page_size, route);
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let activation = outcome.activation();
        if !self.screen.apply(outcome) {
            debug!(activation, "Dropping fetch result for an inactive screen");
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.screen.handle_key(key) {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::Navigate(route) => self.navigate(route),
            Action::Reload => self.navigate(self.screen.route()),
        }
    }

    pub fn render(&self, f: &mut Frame) {
        self.screen.render(f, &self.theme);
    }
}

fn activate(service: &FleetService, page_size: usize, route: Route) -> Screen {
    match route {
        Route::ShipList => {
            let mut screen = ListScreen::new(page_size);
            screen.fetch.begin();
            service.load_ships(screen.activation().guard());
            Screen::List(screen)
        }
        Route::ShipDetail(id) => {
            let mut screen = DetailScreen::new(id.clone());
            screen.fetch.begin();
            service.load_ship(id, screen.activation().guard());
            Screen::Detail(screen)
        }
    }
}
