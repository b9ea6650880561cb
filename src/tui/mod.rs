//! Terminal front end: raw-mode setup, the event loop and rendering.
//!
//! - app.rs: application state on top of the core session
//! - input.rs: key and mouse routing, event loop
//! - actions.rs: app commands and in-cell text editing
//! - keymap/: rebindable app commands
//! - clipboard.rs: clipboard abstraction
//! - ui.rs / help.rs: ratatui rendering

mod actions;
mod app;
mod clipboard;
mod help;
mod input;
mod keymap;
mod ui;

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

pub use app::App;
pub use keymap::load_keymap;

/// Restores the terminal when dropped, including on early return or panic unwind.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = disable_raw_mode();
    }
}

/// Run the interactive editor until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    tracing::info!(rows = app.grid().row_count(), "editor started");

    let result = input::run_app(&mut terminal, app);
    terminal.show_cursor()?;
    tracing::info!("editor closed");
    result
}
