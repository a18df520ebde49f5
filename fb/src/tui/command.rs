//! Command mode (`:` key) parsing
//!
//! Commands mirror the board inputs so everything reachable with the mouse
//! is reachable by typing:
//!
//! - `add <text>` - add a task to todo
//! - `move <id> <status>` - drag a task onto a column
//! - `focus <id>` - open focus mode on a task
//! - `quit` - leave the board

use thiserror::Error;
use tracing::debug;

use crate::domain::{ParseStatusError, Status, TaskId};

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Add(String),
    Move { id: TaskId, status: Status },
    Focus(TaskId),
    Quit,
}

/// Why a command line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid task id: {0}")]
    InvalidId(String),

    #[error(transparent)]
    InvalidStatus(#[from] ParseStatusError),
}

impl BoardCommand {
    /// Parse the text typed after `:`
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        debug!(%input, "BoardCommand::parse: called");
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        match name.to_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "add" | "a" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("add <text>"));
                }
                Ok(Self::Add(rest.to_string()))
            }
            "move" | "mv" | "m" => {
                let mut args = rest.split_whitespace();
                let (Some(id), Some(status)) = (args.next(), args.next()) else {
                    return Err(CommandError::MissingArgument("move <id> <todo|inprogress|done>"));
                };
                Ok(Self::Move {
                    id: parse_id(id)?,
                    status: status.parse()?,
                })
            }
            "focus" | "f" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument("focus <id>"));
                }
                Ok(Self::Focus(parse_id(rest)?))
            }
            "quit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_id(text: &str) -> Result<TaskId, CommandError> {
    text.parse().map_err(|_| CommandError::InvalidId(text.to_string()))
}
