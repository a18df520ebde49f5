//! Task records and their status column

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Unique, monotonically assigned task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// The id following this one
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Status column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    #[serde(rename = "inprogress", alias = "in-progress", alias = "in_progress")]
    InProgress,
    Done,
}

impl Status {
    /// All statuses in column order (left to right)
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Stable identifier used in logs, config and commands
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Column heading
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Position of this column on the board
    pub fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::Done => 2,
        }
    }

    /// Column to the left, if any
    pub fn left(self) -> Option<Self> {
        debug!(?self, "Status::left: called");
        match self {
            Self::Todo => None,
            Self::InProgress => Some(Self::Todo),
            Self::Done => Some(Self::InProgress),
        }
    }

    /// Column to the right, if any
    pub fn right(self) -> Option<Self> {
        debug!(?self, "Status::right: called");
        match self {
            Self::Todo => Some(Self::InProgress),
            Self::InProgress => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text does not name a status column
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown status '{0}' (expected todo, inprogress or done)")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" | "to-do" => Ok(Self::Todo),
            "inprogress" | "in-progress" | "in_progress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A unit of work on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub status: Status,
}

impl Task {
    /// Create a task in the given status
    pub fn new(id: TaskId, text: impl Into<String>, status: Status) -> Self {
        Self {
            id,
            text: text.into(),
            status,
        }
    }
}
