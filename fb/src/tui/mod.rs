//! Terminal User Interface for focusboard
//!
//! Three kanban columns with mouse drag-and-drop and keyboard moves, plus
//! the focus overlay that shows one task at a time.

mod app;
mod command;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use command::{BoardCommand, CommandError};
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;
pub use state::{AppState, InteractionMode, TermBoard};

use std::io::{self, Stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::board::{Board, SnapshotView};
use crate::config::Config;
use crate::notify::NotificationBus;
use crate::store::TaskStore;

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run the interactive board over the given starting tasks
pub async fn run(config: &Config, store: TaskStore) -> Result<()> {
    debug!(tasks = store.len(), "tui::run: called");
    let bus = NotificationBus::with_default_capacity();
    let notifications = bus.subscribe();
    let board = Board::new(store, SnapshotView::new(), bus, config.timing.timing());
    let app = App::new(AppState::new(board, config.notify.toast_duration()));

    let terminal = init()?;

    // Use a guard to ensure terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = TuiRunner::new(
        app,
        terminal,
        config.timing.tick_rate(),
        notifications,
        config.notify.bell,
    );
    runner.run().await
}
