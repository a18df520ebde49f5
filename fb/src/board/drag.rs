//! Drag-drop controller state
//!
//! Tracks the task being dragged for the lifetime of one gesture and the
//! column currently highlighted as a drop target. Store mutation on drop is
//! done by the board; this type only holds gesture state.

use tracing::debug;

use crate::domain::{Status, TaskId};

/// State of the current drag gesture
#[derive(Debug, Clone, Default)]
pub struct DragDropController {
    dragged: Option<TaskId>,
    hover: Option<Status>,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging a task
    pub fn start(&mut self, id: TaskId) {
        debug!(%id, "DragDropController::start: called");
        self.dragged = Some(id);
        self.hover = None;
    }

    /// Pointer is over a column; accept it as a drop target
    pub fn over(&mut self, status: Status) -> bool {
        if self.hover != Some(status) {
            debug!(%status, "DragDropController::over: highlight column");
        }
        self.hover = Some(status);
        true
    }

    /// Pointer left every column
    pub fn leave(&mut self) {
        self.hover = None;
    }

    /// Release over a target: clears the highlight and yields the dragged id
    ///
    /// The dragged id itself is kept until [`DragDropController::end`].
    pub fn release(&mut self) -> Option<TaskId> {
        debug!(dragged = ?self.dragged, "DragDropController::release: called");
        self.hover = None;
        self.dragged
    }

    /// Gesture finished, whether or not anything was dropped
    pub fn end(&mut self) {
        debug!(dragged = ?self.dragged, "DragDropController::end: called");
        self.dragged = None;
        self.hover = None;
    }

    pub fn dragged(&self) -> Option<TaskId> {
        self.dragged
    }

    pub fn hover(&self) -> Option<Status> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }
}
