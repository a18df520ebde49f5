//! Notification kinds
//!
//! The vocabulary of user-facing cues the board emits. Each one would map to
//! a sound or visual flourish; the terminal build logs them, shows them in
//! the status line and can ring the bell.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user-facing event signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    /// A task was added
    Add,
    /// A drag gesture started on a task
    Drag,
    /// A task was dropped into a different, non-done column
    Drop,
    /// A task became done
    Complete,
    /// Focus mode finished opening on a task
    Focus,
    /// Focus mode had no next task to advance to
    Denied,
}

impl Notification {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Drag => "drag",
            Self::Drop => "drop",
            Self::Complete => "complete",
            Self::Focus => "focus",
            Self::Denied => "denied",
        }
    }

    /// Whether this cue deserves an audible bell when bells are enabled
    pub fn is_audible(self) -> bool {
        matches!(self, Self::Complete | Self::Denied)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
