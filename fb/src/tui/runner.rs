//! TUI Runner - main loop that owns the terminal and drives the board clock
//!
//! The TuiRunner is responsible for:
//! - Advancing the board's transition clock by real elapsed time
//! - Dispatching terminal events to App for handling
//! - Turning board notifications into toasts (and the optional bell)
//! - Rendering at the configured tick rate

use std::io::Write;
use std::time::{Duration, Instant};

use eyre::Result;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::notify::Notification;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Event handler
    event_handler: EventHandler,
    /// Board notifications
    notifications: broadcast::Receiver<Notification>,
    /// Ring the terminal bell for audible notifications
    bell: bool,
    /// When the board clock was last advanced
    last_tick: Instant,
}

impl TuiRunner {
    pub fn new(
        app: App,
        terminal: Tui,
        tick_rate: Duration,
        notifications: broadcast::Receiver<Notification>,
        bell: bool,
    ) -> Self {
        debug!(?tick_rate, bell, "TuiRunner::new: called");
        Self {
            app,
            terminal,
            event_handler: EventHandler::new(tick_rate),
            notifications,
            bell,
            last_tick: Instant::now(),
        }
    }

    /// Run the main loop until the user quits
    pub async fn run(&mut self) -> Result<()> {
        debug!("TuiRunner::run: entering main loop");
        loop {
            self.advance_clock();

            self.terminal.draw(|frame| views::render(self.app.state_mut(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => {
                    match event? {
                        Event::Tick => {}
                        Event::Key(key_event) => {
                            if self.app.handle_key(key_event) {
                                break;
                            }
                        }
                        Event::Mouse(mouse_event) => {
                            self.app.handle_mouse(mouse_event);
                        }
                        Event::Resize(width, height) => {
                            debug!(width, height, "TuiRunner::run: resize, redrawing");
                        }
                    }
                }
                notification = self.notifications.recv() => {
                    match notification {
                        Ok(kind) => self.handle_notification(kind),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "TuiRunner::run: notification receiver lagged");
                        }
                        Err(RecvError::Closed) => {
                            debug!("TuiRunner::run: notification bus closed");
                        }
                    }
                }
            }

            if self.app.state().should_quit {
                debug!("TuiRunner::run: should_quit is true, breaking");
                break;
            }
        }

        info!("TUI exiting");
        Ok(())
    }

    /// Move the board clock forward and fire due transitions
    fn advance_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        let state = self.app.state_mut();
        state.board.advance(elapsed);
        // A deferred render may have moved cards out from under the cursor
        state.clamp_selection();
        state.expire_toast();
    }

    fn handle_notification(&mut self, kind: Notification) {
        debug!(%kind, "TuiRunner::handle_notification: called");
        self.app.state_mut().show_toast(kind);
        if self.bell && kind.is_audible() {
            let mut stdout = std::io::stdout();
            // Bell failures are not worth interrupting the board for
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        }
    }
}
