/// Terminal dashboard over the SpaceX v3 ships API
mod app;
mod clients;
mod config;
mod domain;
mod errors;
mod event;
mod routes;
mod screens;
mod services;
mod table;
mod theme;
mod utils;

use crate::app::App;
use crate::clients::SpaceXClient;
use crate::config::AppConfig;
use crate::errors::ApiResult;
use crate::event::{spawn_input_thread, TerminalEvent};
use crate::routes::Route;
use crate::services::{FetchOutcome, FleetService};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize logging; stdout belongs to the UI
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
    info!(api = %config.api_base_url, page_size = config.page_size, "Configuration loaded");

    let route = initial_route();
    let client = SpaceXClient::new(config.api_base_url.clone(), config.http_timeout)?;
    info!("SpaceX client ready for {}", client.base_url());

    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let service = FleetService::new(Arc::new(client), outcome_tx);

    let mut terminal = setup_terminal()?;
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_thread(input_tx, config.tick_rate);

    let mut app = App::new(service, config.page_size, route);

    let result = run(&mut terminal, &mut app, &mut input_rx, &mut outcome_rx).await;

    restore_terminal(&mut terminal)?;
    info!(route = %app.screen().route(), "Shutting down");
    result
}

/// Draw, then wait for either a key press or a finished fetch
async fn run(
    terminal: &mut Tui,
    app: &mut App,
    input_rx: &mut UnboundedReceiver<TerminalEvent>,
    outcome_rx: &mut UnboundedReceiver<FetchOutcome>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if app.should_quit {
            return Ok(());
        }

        tokio::select! {
            Some(event) = input_rx.recv() => match event {
                TerminalEvent::Key(key) => app.handle_key(key),
                TerminalEvent::Resize(width, height) => debug!(width, height, "Terminal resized"),
                TerminalEvent::Tick => {}
            },
            Some(outcome) = outcome_rx.recv() => app.apply_outcome(outcome),
            else => return Ok(()),
        }
    }
}

/// First command-line argument, e.g. `/ships/OCISLY`; the list otherwise
fn initial_route() -> Route {
    match std::env::args().nth(1) {
        None => Route::ShipList,
        Some(path) => Route::parse(&path).unwrap_or_else(|| {
            warn!(path = %path, "Unknown route, starting on the vessel list");
            Route::ShipList
        }),
    }
}

fn setup_terminal() -> ApiResult<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> ApiResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
