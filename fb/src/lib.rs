//! focusboard - a terminal kanban board with a focus mode
//!
//! Tasks live in three columns (To Do, In Progress, Done) and move between
//! them by mouse drag-and-drop or keyboard. Focus mode shows one task at a
//! time, full screen, with complete / next / back controls.
//!
//! # Core Concepts
//!
//! - **Store is the truth**: the board renders a projection of the
//!   [`store::TaskStore`]; the view may lag it while a completion animation
//!   plays, then catches up with one deferred render
//! - **Logical clock**: every transition delay runs on a [`scheduler::Scheduler`]
//!   advanced explicitly, so the whole board is testable without sleeping
//! - **Notifications**: user-visible events go to a
//!   [`notify::NotificationSink`], which the TUI turns into toasts
//!
//! # Modules
//!
//! - [`domain`] - Task, TaskId and Status
//! - [`store`] - In-memory task store
//! - [`board`] - Projection, drag-and-drop, focus mode and the board controller
//! - [`scheduler`] - Logical-clock timers for transitions
//! - [`notify`] - Notification kinds and delivery
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//! - [`tui`] - Terminal front end

pub mod board;
pub mod cli;
pub mod config;
pub mod domain;
pub mod notify;
pub mod scheduler;
pub mod store;
pub mod tui;

// Re-export commonly used types
pub use board::{Board, BoardProjection, BoardView, DropOutcome, FocusOutcome, SnapshotView, Timing};
pub use config::Config;
pub use domain::{Status, Task, TaskId};
pub use notify::{Notification, NotificationBus, NotificationSink, RecordingSink};
pub use store::TaskStore;
