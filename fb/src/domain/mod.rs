//! Domain types for the board
//!
//! - [`Task`] - a unit of work with text and a status
//! - [`Status`] - one of the three board columns
//! - [`TaskId`] - the single identifier type used everywhere

mod task;

pub use task::{ParseStatusError, Status, Task, TaskId};
