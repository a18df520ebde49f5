//! Board projection - the task store split into three display columns
//!
//! A projection is a plain value computed from the store. It never mutates
//! anything and is recomputed in full on every render.

use tracing::trace;

use crate::domain::{Status, TaskId};
use crate::store::TaskStore;

/// One task card as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: TaskId,
    pub text: String,
}

/// One status column as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub status: Status,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    fn empty(status: Status) -> Self {
        Self {
            status,
            cards: Vec::new(),
        }
    }
}

/// The whole board as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProjection {
    columns: [ColumnView; 3],
}

impl Default for BoardProjection {
    fn default() -> Self {
        Self {
            columns: Status::ALL.map(ColumnView::empty),
        }
    }
}

impl BoardProjection {
    /// Project the store into columns, keeping store order within each column
    pub fn project(store: &TaskStore) -> Self {
        trace!(tasks = store.len(), "BoardProjection::project: called");
        let columns = Status::ALL.map(|status| ColumnView {
            status,
            cards: store
                .tasks_by_status(status)
                .map(|t| CardView {
                    id: t.id,
                    text: t.text.clone(),
                })
                .collect(),
        });
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnView; 3] {
        &self.columns
    }

    pub fn column(&self, status: Status) -> &ColumnView {
        &self.columns[status.index()]
    }

    /// Ids shown in one column, top to bottom
    pub fn ids(&self, status: Status) -> Vec<TaskId> {
        self.column(status).cards.iter().map(|c| c.id).collect()
    }

    /// Where a task is displayed: its column and row
    pub fn locate(&self, id: TaskId) -> Option<(Status, usize)> {
        self.columns.iter().find_map(|col| {
            col.cards
                .iter()
                .position(|c| c.id == id)
                .map(|row| (col.status, row))
        })
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.locate(id).is_some()
    }

    /// Total number of cards on the board
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Task;

    #[test]
    fn test_project_splits_by_status_in_order() {
        let store = TaskStore::with_tasks([
            Task::new(TaskId(1), "Design wacky UI", Status::Done),
            Task::new(TaskId(2), "Implement drag n drop", Status::InProgress),
            Task::new(TaskId(3), "Add ADHD mode", Status::Todo),
            Task::new(TaskId(4), "Find 90s sounds", Status::Todo),
        ]);

        let projection = BoardProjection::project(&store);
        assert_eq!(projection.ids(Status::Todo), vec![TaskId(3), TaskId(4)]);
        assert_eq!(projection.ids(Status::InProgress), vec![TaskId(2)]);
        assert_eq!(projection.ids(Status::Done), vec![TaskId(1)]);
        assert_eq!(projection.len(), 4);
        assert_eq!(projection.column(Status::Todo).cards[1].text, "Find 90s sounds");
    }

    #[test]
    fn test_locate_reports_column_and_row() {
        let mut store = TaskStore::new();
        store.add_task("a");
        store.add_task("b");
        let projection = BoardProjection::project(&store);

        assert_eq!(projection.locate(TaskId(2)), Some((Status::Todo, 1)));
        assert_eq!(projection.locate(TaskId(3)), None);
        assert!(!projection.contains(TaskId(3)));
    }

    #[test]
    fn test_default_projection_is_empty() {
        let projection = BoardProjection::default();
        assert!(projection.is_empty());
        assert_eq!(projection.column(Status::Done).status, Status::Done);
    }
}
