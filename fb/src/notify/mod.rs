//! Notification sink for user-facing cues
//!
//! The board calls [`NotificationSink::notify`] at well-defined moments
//! (task added, drag started, drop, completion, focus opened, denied).
//! Delivery is fire-and-forget: failures never reach the board.
//!
//! ```text
//!   Board ──notify()──▶ NotificationBus ──broadcast──▶ status line
//!                                                └──▶ terminal bell
//! ```

mod bus;
mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, NotificationBus, NotificationSink, RecordingSink};
pub use types::Notification;
