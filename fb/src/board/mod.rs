//! Board - the application state container
//!
//! A [`Board`] is created once at startup and owns everything mutable: the
//! task store, the drag gesture, the focus session, the transition
//! scheduler, the view and the notification sink. Every user input is a
//! method on the board; nothing lives in globals.
//!
//! Mutations apply synchronously. Anything animation-timed (focus entrance
//! and exit, the completion animation) is a scheduled [`Transition`] that
//! fires from [`Board::advance`].
//!
//! No operation here fails. Inputs that do not apply (blank text, unknown
//! ids, dropping on the same column, focus input mid-transition) are
//! skipped and reported through the returned outcome.

mod drag;
mod focus;
mod projection;
mod view;

pub use drag::DragDropController;
pub use focus::{AfterClose, FocusSession, FocusState};
pub use projection::{BoardProjection, CardView, ColumnView};
pub use view::{BoardView, SnapshotView};

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{Status, Task, TaskId};
use crate::notify::{Notification, NotificationSink};
use crate::scheduler::{Scheduler, TimerId};
use crate::store::TaskStore;

/// Durations of the animation-timed transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Delay before the focus overlay counts as open
    pub entrance: Duration,
    /// Focus overlay exit transition
    pub exit: Duration,
    /// Micro-transition between one focused task and the next
    pub next: Duration,
    /// Completion animation on a card before the deferred re-render
    pub completion_animation: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            entrance: Duration::from_millis(50),
            exit: Duration::from_millis(500),
            next: Duration::from_millis(400),
            completion_animation: Duration::from_millis(600),
        }
    }
}

/// Deferred step of a running transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    FocusOpened(TaskId),
    FocusClosed,
    AnimationFinished(TaskId),
}

/// Result of dropping a dragged task on a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing was being dragged
    NoDrag,
    /// The dragged id no longer resolves to a task
    NotFound(TaskId),
    /// Dropped on the column it already occupies
    Unchanged(TaskId),
    /// Moved between columns and re-rendered
    Moved { id: TaskId, from: Status, to: Status },
    /// Moved into done; the completion effect is running
    Completed { id: TaskId, from: Status },
}

impl DropOutcome {
    /// Whether the store changed
    pub fn changed(&self) -> bool {
        matches!(self, Self::Moved { .. } | Self::Completed { .. })
    }
}

/// Result of a focus-mode input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Selected id does not resolve to a task
    NotFound(TaskId),
    /// No task is focused
    NoFocus,
    /// A transition is running; input rejected
    Busy,
    /// Entrance transition started
    Opening(TaskId),
    /// Exit transition started
    Closing(TaskId),
    /// Moving on to the next task in the same column
    Advancing { from: TaskId, to: TaskId },
    /// No next task; closing instead
    Denied(TaskId),
}

/// The kanban board and everything it owns
#[derive(Debug)]
pub struct Board<V, S> {
    store: TaskStore,
    drag: DragDropController,
    focus: FocusSession,
    scheduler: Scheduler<Transition>,
    animations: HashMap<TaskId, TimerId>,
    view: V,
    sink: S,
    timing: Timing,
}

impl<V: BoardView, S: NotificationSink> Board<V, S> {
    /// Create a board and perform the initial render
    pub fn new(store: TaskStore, view: V, sink: S, timing: Timing) -> Self {
        info!(tasks = store.len(), ?timing, "Board created");
        let mut board = Self {
            store,
            drag: DragDropController::new(),
            focus: FocusSession::new(),
            scheduler: Scheduler::new(),
            animations: HashMap::new(),
            view,
            sink,
            timing,
        };
        board.render();
        board
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn drag(&self) -> &DragDropController {
        &self.drag
    }

    pub fn focus(&self) -> &FocusSession {
        &self.focus
    }

    /// Task displayed in the focus overlay, resolved through the store
    pub fn focused_task(&self) -> Option<&Task> {
        self.focus.focused().and_then(|id| self.store.find_task(id))
    }

    /// Current logical time of the transition clock
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Number of transition steps waiting to fire
    pub fn pending_transitions(&self) -> usize {
        self.scheduler.pending()
    }

    // === Task store ===

    /// Add a task from user text; blank text is ignored
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        debug!(%text, "Board::add_task: called");
        let id = self.store.add_task(text)?;
        self.render();
        self.sink.notify(Notification::Add);
        Some(id)
    }

    /// Full re-render of the view from the store
    ///
    /// Supersedes any completion animation still running: its deferred
    /// re-render is cancelled since the board is now up to date.
    pub fn render(&mut self) {
        for (id, timer) in self.animations.drain() {
            debug!(%id, "Board::render: superseding completion animation");
            self.scheduler.cancel(timer);
            self.view.clear_animation(id);
        }
        self.view.render(BoardProjection::project(&self.store));
    }

    // === Drag and drop ===

    /// Drag started on a task card
    pub fn drag_start(&mut self, id: TaskId) {
        debug!(%id, "Board::drag_start: called");
        self.drag.start(id);
        self.sink.notify(Notification::Drag);
    }

    /// Drag is over a column; always accepted as a drop target
    pub fn drag_over(&mut self, status: Status) -> bool {
        self.drag.over(status)
    }

    /// Drag left every column
    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Drop the dragged task on a column
    pub fn drop(&mut self, target: Status) -> DropOutcome {
        debug!(%target, "Board::drop: called");
        let Some(id) = self.drag.release() else {
            debug!("Board::drop: nothing dragged");
            return DropOutcome::NoDrag;
        };
        let Some(from) = self.store.find_task(id).map(|t| t.status) else {
            debug!(%id, "Board::drop: dragged task not found");
            return DropOutcome::NotFound(id);
        };
        if from == target {
            debug!(%id, "Board::drop: same column, nothing to do");
            return DropOutcome::Unchanged(id);
        }

        self.store.set_status(id, target);
        if target == Status::Done {
            self.completion_effect(id);
            DropOutcome::Completed { id, from }
        } else {
            self.render();
            self.sink.notify(Notification::Drop);
            DropOutcome::Moved { id, from, to: target }
        }
    }

    /// Drop landed somewhere that is not a column
    pub fn drop_outside(&mut self) {
        debug!("Board::drop_outside: ignoring");
        self.drag.release();
    }

    /// Drag gesture finished, dropped or not
    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    /// A complete drag gesture of one task onto a column
    pub fn move_task(&mut self, id: TaskId, target: Status) -> DropOutcome {
        debug!(%id, %target, "Board::move_task: called");
        if self.store.find_task(id).is_none() {
            return DropOutcome::NotFound(id);
        }
        self.drag_start(id);
        self.drag_over(target);
        let outcome = self.drop(target);
        self.drag_end();
        outcome
    }

    // === Completion effect ===

    fn completion_effect(&mut self, id: TaskId) {
        debug!(%id, "Board::completion_effect: called");
        self.sink.notify(Notification::Complete);

        if !self.view.locate(id) {
            warn!(%id, "Completion effect: card not displayed, rendering immediately");
            self.render();
            return;
        }

        if let Some(previous) = self.animations.remove(&id) {
            self.scheduler.cancel(previous);
        }
        self.view.animate_completion(id);
        let timer = self
            .scheduler
            .schedule(self.timing.completion_animation, Transition::AnimationFinished(id));
        self.animations.insert(id, timer);
    }

    // === Focus mode ===

    /// Select a task card: opens focus mode on it
    pub fn select_task(&mut self, id: TaskId) -> FocusOutcome {
        debug!(%id, "Board::select_task: called");
        if self.store.find_task(id).is_none() {
            debug!(%id, "Board::select_task: task not found");
            return FocusOutcome::NotFound(id);
        }
        if !self.focus.begin_open(id) {
            return FocusOutcome::Busy;
        }
        self.scheduler.schedule(self.timing.entrance, Transition::FocusOpened(id));
        FocusOutcome::Opening(id)
    }

    /// Close focus mode
    pub fn focus_back(&mut self) -> FocusOutcome {
        debug!("Board::focus_back: called");
        self.begin_close(AfterClose::Nothing, self.timing.exit)
    }

    /// Clicking the overlay background closes focus mode
    pub fn overlay_background_click(&mut self) -> FocusOutcome {
        self.focus_back()
    }

    /// Mark the focused task done, close, then run the completion effect
    pub fn focus_complete(&mut self) -> FocusOutcome {
        debug!("Board::focus_complete: called");
        let Some(id) = self.focus.open_task() else {
            return self.inactive_outcome();
        };
        let then = if self.store.set_status(id, Status::Done) {
            AfterClose::Complete(id)
        } else {
            debug!(%id, "Board::focus_complete: already done or missing, just closing");
            AfterClose::Nothing
        };
        self.begin_close(then, self.timing.exit)
    }

    /// Advance to the next task in the focused task's column
    pub fn focus_next(&mut self) -> FocusOutcome {
        debug!("Board::focus_next: called");
        let Some(id) = self.focus.open_task() else {
            return self.inactive_outcome();
        };

        let follower = self.store.find_task(id).and_then(|current| {
            let mut rest = self.store.tasks_by_status(current.status).skip_while(|t| t.id != id);
            rest.next()?;
            rest.next().map(|t| t.id)
        });

        match follower {
            Some(next) => {
                debug!(from = %id, to = %next, "Board::focus_next: advancing");
                self.begin_close(AfterClose::Reopen(next), self.timing.next);
                FocusOutcome::Advancing { from: id, to: next }
            }
            None => {
                debug!(%id, "Board::focus_next: last in column, denied");
                self.sink.notify(Notification::Denied);
                self.begin_close(AfterClose::Nothing, self.timing.exit);
                FocusOutcome::Denied(id)
            }
        }
    }

    fn begin_close(&mut self, then: AfterClose, delay: Duration) -> FocusOutcome {
        match self.focus.begin_close(then) {
            Some(id) => {
                self.scheduler.schedule(delay, Transition::FocusClosed);
                FocusOutcome::Closing(id)
            }
            None => self.inactive_outcome(),
        }
    }

    fn inactive_outcome(&self) -> FocusOutcome {
        if self.focus.is_transitioning() {
            debug!(state = ?self.focus.state(), "Board: transition running, input rejected");
            FocusOutcome::Busy
        } else {
            FocusOutcome::NoFocus
        }
    }

    // === Transitions ===

    /// Move the transition clock forward, firing everything that comes due
    pub fn advance(&mut self, elapsed: Duration) {
        let deadline = self.scheduler.now() + elapsed;
        while let Some(transition) = self.scheduler.pop_due(deadline) {
            self.fire(transition);
        }
        self.scheduler.settle(deadline);
    }

    fn fire(&mut self, transition: Transition) {
        debug!(?transition, "Board::fire: called");
        match transition {
            Transition::FocusOpened(id) => {
                if self.focus.finish_open() == Some(id) {
                    info!(%id, "Focus mode open");
                    self.sink.notify(Notification::Focus);
                }
            }
            Transition::FocusClosed => match self.focus.finish_close() {
                Some(AfterClose::Complete(id)) => self.completion_effect(id),
                Some(AfterClose::Reopen(id)) => {
                    let outcome = self.select_task(id);
                    debug!(?outcome, "Board::fire: reopened focus");
                }
                Some(AfterClose::Nothing) | None => {}
            },
            Transition::AnimationFinished(id) => {
                self.animations.remove(&id);
                self.view.clear_animation(id);
                self.render();
            }
        }
    }
}
