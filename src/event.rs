/// Terminal input, read on a dedicated thread and forwarded to the UI loop
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

#[derive(Debug, Clone)]
pub enum TerminalEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// The terminal was resized
    Resize(u16, u16),
    /// Nothing happened within one tick
    Tick,
}

impl TerminalEvent {
    /// Map a crossterm event; key releases and mouse input are dropped
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TerminalEvent::Key(key)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Poll the terminal until the receiving side goes away
pub fn spawn_input_thread(sender: UnboundedSender<TerminalEvent>, tick_rate: Duration) {
    thread::spawn(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(evt) => TerminalEvent::from_crossterm(evt),
                Err(e) => {
                    warn!("Terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => Some(TerminalEvent::Tick),
            Err(e) => {
                warn!("Terminal poll failed: {}", e);
                break;
            }
        };

        if let Some(event) = next {
            if sender.send(event).is_err() {
                break;
            }
        }
    });
}
