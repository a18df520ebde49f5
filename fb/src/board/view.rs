//! View seam between board logic and whatever draws it
//!
//! The board hands finished projections to a [`BoardView`] and asks it to
//! find or animate rendered cards. [`SnapshotView`] keeps the last
//! projection it was given, so what it shows lags the store exactly while a
//! re-render is being deferred.

use std::collections::HashSet;

use tracing::debug;

use super::projection::BoardProjection;
use crate::domain::TaskId;

/// Rendering surface for the board
pub trait BoardView {
    /// Replace everything displayed with a fresh projection
    fn render(&mut self, projection: BoardProjection);

    /// Whether a card for this task is currently displayed
    fn locate(&self, id: TaskId) -> bool;

    /// Start the completion animation on a displayed card
    fn animate_completion(&mut self, id: TaskId);

    /// Stop the completion animation on a card
    fn clear_animation(&mut self, id: TaskId);
}

/// View that keeps the last rendered projection in memory
#[derive(Debug, Clone, Default)]
pub struct SnapshotView {
    snapshot: BoardProjection,
    animating: HashSet<TaskId>,
    renders: usize,
}

impl SnapshotView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The projection currently displayed
    pub fn snapshot(&self) -> &BoardProjection {
        &self.snapshot
    }

    /// Whether a card is mid completion animation
    pub fn is_animating(&self, id: TaskId) -> bool {
        self.animating.contains(&id)
    }

    /// How many full renders have happened
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl BoardView for SnapshotView {
    fn render(&mut self, projection: BoardProjection) {
        self.renders += 1;
        debug!(renders = self.renders, cards = projection.len(), "SnapshotView::render");
        self.snapshot = projection;
        // Fresh cards carry no animation state
        self.animating.clear();
    }

    fn locate(&self, id: TaskId) -> bool {
        self.snapshot.contains(id)
    }

    fn animate_completion(&mut self, id: TaskId) {
        debug!(%id, "SnapshotView::animate_completion");
        self.animating.insert(id);
    }

    fn clear_animation(&mut self, id: TaskId) {
        self.animating.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    #[test]
    fn test_render_replaces_snapshot_and_clears_animation() {
        let mut store = TaskStore::new();
        let id = store.add_task("card").unwrap();
        let mut view = SnapshotView::new();
        assert!(!view.locate(id));

        view.render(BoardProjection::project(&store));
        assert!(view.locate(id));
        view.animate_completion(id);
        assert!(view.is_animating(id));

        view.render(BoardProjection::project(&store));
        assert!(!view.is_animating(id));
        assert_eq!(view.render_count(), 2);
    }
}
