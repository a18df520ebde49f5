//! Notification bus - fire-and-forget fan-out of board cues
//!
//! The bus uses a tokio broadcast channel so any number of consumers (status
//! line, bell) can listen without the board knowing about them. Emitting
//! never fails: with no subscribers, or with a lagging one, cues are dropped.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::{debug, info};

use super::types::Notification;

/// Default channel capacity (notifications)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Destination for user-facing cues
///
/// Implementations must never panic or block the caller.
pub trait NotificationSink {
    fn notify(&self, kind: Notification);
}

/// Broadcast-backed sink shared by the board and its consumers
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a new bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "NotificationBus::new: creating notification bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a new bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Subscribe to receive cues emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        debug!("NotificationBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl NotificationSink for NotificationBus {
    fn notify(&self, kind: Notification) {
        info!(%kind, "Playing sound");
        // No subscribers is OK
        let _ = self.tx.send(kind);
    }
}

/// Sink that remembers every cue, for inspecting what the board emitted
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, oldest first
    pub fn recorded(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// How many times a given cue was notified
    pub fn count(&self, kind: Notification) -> usize {
        self.recorded().iter().filter(|k| **k == kind).count()
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, kind: Notification) {
        debug!(%kind, "RecordingSink::notify");
        if let Ok(mut log) = self.log.lock() {
            log.push(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_without_subscribers_does_not_fail() {
        let bus = NotificationBus::with_default_capacity();
        assert_eq!(bus.subscriber_count(), 0);
        bus.notify(Notification::Add);
    }

    #[test]
    fn test_bus_fans_out_to_subscribers() {
        let bus = NotificationBus::new(8);
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        bus.notify(Notification::Drag);
        bus.notify(Notification::Drop);

        assert_eq!(a.try_recv().unwrap(), Notification::Drag);
        assert_eq!(a.try_recv().unwrap(), Notification::Drop);
        assert_eq!(b.try_recv().unwrap(), Notification::Drag);
    }

    #[test]
    fn test_recording_sink_clones_share_log() {
        let sink = RecordingSink::new();
        let handle = sink.clone();
        sink.notify(Notification::Focus);
        sink.notify(Notification::Focus);
        sink.notify(Notification::Denied);

        assert_eq!(handle.count(Notification::Focus), 2);
        assert_eq!(
            handle.recorded(),
            vec![Notification::Focus, Notification::Focus, Notification::Denied]
        );

        handle.clear();
        assert!(sink.recorded().is_empty());
    }
}
