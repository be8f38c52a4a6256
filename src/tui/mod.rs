//! Interactive terminal front end.
//!
//! All core state lives in [`crate::controller::SessionController`]; this
//! module owns the event loop that drives it. Spawned fetch and download
//! tasks report back through an unbounded channel, and every mutation
//! happens on this loop, one event at a time.

mod app;
mod draw;
mod event;
mod fetch;
mod input;

use std::io;
use std::time::Duration;

use crossterm::event::Event;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::error::Result;

use self::app::App;
use self::draw::draw;
use self::event::AppEvent;
use self::fetch::handle_event;
use self::input::{handle_input, handle_paste};

/// RAII guard that ensures terminal cleanup on drop.
/// Restores terminal to normal mode even if a panic occurs.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            EnterAlternateScreen,
            crossterm::event::EnableBracketedPaste
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::event::DisableBracketedPaste,
            LeaveAlternateScreen
        );
    }
}

/// Run the interactive TUI against the configured backend.
///
/// # Errors
///
/// Returns an error if terminal setup fails, the configuration is invalid,
/// or TUI operations encounter I/O errors.
pub async fn run(config: ClientConfig) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(&config, event_tx)?;

    // Initialize terminal with RAII guard for automatic cleanup
    let _terminal_guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        // Poll for input with 100ms timeout
        if crossterm::event::poll(Duration::from_millis(100))? {
            match crossterm::event::read()? {
                Event::Key(key) => handle_input(&mut app, key),
                Event::Paste(text) => handle_paste(&mut app, &text),
                _ => {}
            }
        }

        // Drain task events (non-blocking)
        while let Ok(event) = event_rx.try_recv() {
            handle_event(&mut app, event);
        }

        if app.should_quit {
            break;
        }
    }

    // Show cursor before exit (terminal cleanup handled by RAII guard)
    terminal.show_cursor()?;

    Ok(())
}
