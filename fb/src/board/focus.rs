//! Focus session state machine
//!
//! ```text
//!            begin_open             finish_open
//!   Closed ─────────────▶ Opening ─────────────▶ Open
//!     ▲                                           │
//!     │         finish_close                      │ begin_close(then)
//!     └──────────────────── Closing { then } ◀────┘
//! ```
//!
//! Each method only performs a transition that is legal from the current
//! state and reports whether it did. Scheduling, notifications and store
//! changes are the board's job. Because every transition is guarded, input
//! arriving while `Opening` or `Closing` is rejected instead of racing.

use tracing::debug;

use crate::domain::TaskId;

/// What happens once the exit transition finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterClose {
    /// Plain close
    Nothing,
    /// Run the completion effect on this task
    Complete(TaskId),
    /// Open focus mode again on this task
    Reopen(TaskId),
}

/// Focus overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Closed,
    /// Overlay visible, entrance transition running
    Opening(TaskId),
    /// Overlay stable, showing one task
    Open(TaskId),
    /// Exit transition running
    Closing { task: TaskId, then: AfterClose },
}

/// The single focus session of a board
#[derive(Debug, Clone, Default)]
pub struct FocusSession {
    state: FocusState,
}

impl FocusSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    /// Task shown in the overlay, in any non-closed state
    pub fn focused(&self) -> Option<TaskId> {
        match self.state {
            FocusState::Closed => None,
            FocusState::Opening(id) | FocusState::Open(id) => Some(id),
            FocusState::Closing { task, .. } => Some(task),
        }
    }

    /// Task shown while the overlay is stable and accepting input
    pub fn open_task(&self) -> Option<TaskId> {
        match self.state {
            FocusState::Open(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_overlay_visible(&self) -> bool {
        !matches!(self.state, FocusState::Closed)
    }

    /// Whether an entrance or exit transition is running
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, FocusState::Opening(_) | FocusState::Closing { .. })
    }

    /// `Closed → Opening`
    pub fn begin_open(&mut self, id: TaskId) -> bool {
        debug!(%id, state = ?self.state, "FocusSession::begin_open: called");
        match self.state {
            FocusState::Closed => {
                self.state = FocusState::Opening(id);
                true
            }
            _ => {
                debug!("FocusSession::begin_open: session already active, rejecting");
                false
            }
        }
    }

    /// `Opening → Open`; returns the task now open
    pub fn finish_open(&mut self) -> Option<TaskId> {
        debug!(state = ?self.state, "FocusSession::finish_open: called");
        match self.state {
            FocusState::Opening(id) => {
                self.state = FocusState::Open(id);
                Some(id)
            }
            _ => None,
        }
    }

    /// `Open → Closing`; returns the task being closed
    pub fn begin_close(&mut self, then: AfterClose) -> Option<TaskId> {
        debug!(?then, state = ?self.state, "FocusSession::begin_close: called");
        match self.state {
            FocusState::Open(task) => {
                self.state = FocusState::Closing { task, then };
                Some(task)
            }
            _ => {
                debug!("FocusSession::begin_close: not open, rejecting");
                None
            }
        }
    }

    /// `Closing → Closed`; returns what should follow
    pub fn finish_close(&mut self) -> Option<AfterClose> {
        debug!(state = ?self.state, "FocusSession::finish_close: called");
        match self.state {
            FocusState::Closing { then, .. } => {
                self.state = FocusState::Closed;
                Some(then)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut session = FocusSession::new();
        assert!(!session.is_overlay_visible());

        assert!(session.begin_open(TaskId(1)));
        assert_eq!(session.state(), FocusState::Opening(TaskId(1)));
        assert!(session.is_transitioning());
        assert_eq!(session.open_task(), None);

        assert_eq!(session.finish_open(), Some(TaskId(1)));
        assert_eq!(session.open_task(), Some(TaskId(1)));

        assert_eq!(session.begin_close(AfterClose::Nothing), Some(TaskId(1)));
        assert_eq!(session.focused(), Some(TaskId(1)));
        assert!(session.is_overlay_visible());

        assert_eq!(session.finish_close(), Some(AfterClose::Nothing));
        assert_eq!(session.state(), FocusState::Closed);
        assert_eq!(session.focused(), None);
    }

    #[test]
    fn test_begin_open_rejected_when_active() {
        let mut session = FocusSession::new();
        session.begin_open(TaskId(1));
        assert!(!session.begin_open(TaskId(2)));
        session.finish_open();
        assert!(!session.begin_open(TaskId(2)));
        assert_eq!(session.open_task(), Some(TaskId(1)));
    }

    #[test]
    fn test_close_requires_open() {
        let mut session = FocusSession::new();
        assert_eq!(session.begin_close(AfterClose::Nothing), None);
        session.begin_open(TaskId(5));
        assert_eq!(session.begin_close(AfterClose::Nothing), None);
        assert_eq!(session.finish_close(), None);
    }

    #[test]
    fn test_close_carries_follow_up() {
        let mut session = FocusSession::new();
        session.begin_open(TaskId(1));
        session.finish_open();
        session.begin_close(AfterClose::Reopen(TaskId(2)));
        assert_eq!(session.finish_close(), Some(AfterClose::Reopen(TaskId(2))));
    }

    #[test]
    fn test_stale_finish_open_is_ignored() {
        let mut session = FocusSession::new();
        assert_eq!(session.finish_open(), None);
        assert_eq!(session.state(), FocusState::Closed);
    }
}
