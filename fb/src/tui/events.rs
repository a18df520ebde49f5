//! TUI event handling
//!
//! Terminal input is polled on a blocking thread and forwarded over a tokio
//! channel, with a tick whenever the poll times out.

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent};
use eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick (periodic refresh)
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        debug!(?tick_rate, "EventHandler::new: called");
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::spawn(move || {
            debug!("EventHandler: event polling thread started");
            loop {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Release and repeat events would double every keystroke on some terminals
                        Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => Event::Key(key),
                        Ok(event::Event::Mouse(mouse)) => Event::Mouse(mouse),
                        Ok(event::Event::Resize(w, h)) => {
                            debug!(w, h, "EventHandler: resize event received");
                            Event::Resize(w, h)
                        }
                        Ok(_) => continue,
                        Err(e) => {
                            debug!(error = %e, "EventHandler: read failed, skipping");
                            continue;
                        }
                    }
                } else {
                    Event::Tick
                };

                if tx.send(event).is_err() {
                    debug!("EventHandler: channel closed, exiting loop");
                    break;
                }
            }
            debug!("EventHandler: event polling thread exiting");
        });

        Self { rx }
    }

    /// Get the next event (async)
    pub async fn next(&mut self) -> Result<Event> {
        let event = self.rx.recv().await.ok_or_else(|| eyre::eyre!("Event channel closed"))?;
        trace!(?event, "EventHandler::next: received event");
        Ok(event)
    }
}
