//! Task store - the ordered collection of tasks and the id generator
//!
//! The store is the only owner of task records. Everything else refers to
//! tasks by [`TaskId`] and resolves them through [`TaskStore::find_task`].

use tracing::{debug, info};

use crate::domain::{Status, Task, TaskId};

/// Ordered, in-memory task collection
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: TaskId,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store; the first task gets id 1
    pub fn new() -> Self {
        debug!("TaskStore::new: called");
        Self {
            tasks: Vec::new(),
            next_id: TaskId(1),
        }
    }

    /// Create a store pre-populated with existing tasks
    ///
    /// The id generator continues from the highest id present.
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks: Vec<Task> = tasks.into_iter().collect();
        let next_id = tasks.iter().map(|t| t.id).max().map(TaskId::next).unwrap_or(TaskId(1));
        debug!(count = tasks.len(), %next_id, "TaskStore::with_tasks: called");
        Self { tasks, next_id }
    }

    /// Add a task in `todo`
    ///
    /// Returns `None` without touching the store when the trimmed text is empty.
    pub fn add_task(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            debug!("TaskStore::add_task: empty text, ignoring");
            return None;
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.tasks.push(Task::new(id, text, Status::Todo));
        info!(%id, %text, "Task added");
        Some(id)
    }

    /// Look up a task by id
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Move a task to another status
    ///
    /// Returns true only when the task exists and its status actually changed.
    pub fn set_status(&mut self, id: TaskId, status: Status) -> bool {
        debug!(%id, %status, "TaskStore::set_status: called");
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.status != status => {
                info!(%id, from = %task.status, to = %status, "Task status changed");
                task.status = status;
                true
            }
            Some(_) => {
                debug!(%id, "TaskStore::set_status: status unchanged");
                false
            }
            None => {
                debug!(%id, "TaskStore::set_status: task not found");
                false
            }
        }
    }

    /// Tasks in one column, in insertion order
    ///
    /// Computed lazily on every call; nothing is cached.
    pub fn tasks_by_status(&self, status: Status) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.status == status)
    }

    /// All tasks in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Id the next added task will receive
    pub fn next_id(&self) -> TaskId {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_store() -> TaskStore {
        TaskStore::with_tasks([
            Task::new(TaskId(1), "A", Status::Todo),
            Task::new(TaskId(2), "B", Status::Todo),
            Task::new(TaskId(3), "C", Status::Done),
        ])
    }

    #[test]
    fn test_new_store_starts_at_one() {
        let mut store = TaskStore::new();
        assert!(store.is_empty());
        assert_eq!(store.add_task("first"), Some(TaskId(1)));
        assert_eq!(store.add_task("second"), Some(TaskId(2)));
    }

    #[test]
    fn test_with_tasks_continues_after_max_id() {
        let mut store = TaskStore::with_tasks([
            Task::new(TaskId(9), "nine", Status::Done),
            Task::new(TaskId(4), "four", Status::Todo),
        ]);
        assert_eq!(store.next_id(), TaskId(10));
        assert_eq!(store.add_task("ten"), Some(TaskId(10)));
    }

    #[test]
    fn test_add_task_trims_text() {
        let mut store = TaskStore::new();
        let id = store.add_task("  write docs \n").unwrap();
        assert_eq!(store.find_task(id).unwrap().text, "write docs");
    }

    #[test]
    fn test_add_task_ignores_blank_text() {
        let mut store = sample_store();
        assert_eq!(store.add_task(""), None);
        assert_eq!(store.add_task("   "), None);
        assert_eq!(store.len(), 3);
        assert_eq!(store.next_id(), TaskId(4));
    }

    #[test]
    fn test_find_task_missing() {
        let store = sample_store();
        assert!(store.find_task(TaskId(42)).is_none());
    }

    #[test]
    fn test_set_status_reports_change() {
        let mut store = sample_store();
        assert!(store.set_status(TaskId(1), Status::InProgress));
        assert_eq!(store.find_task(TaskId(1)).unwrap().status, Status::InProgress);
    }

    #[test]
    fn test_set_status_same_status_is_no_change() {
        let mut store = sample_store();
        let before: Vec<TaskId> = store.iter().map(|t| t.id).collect();
        assert!(!store.set_status(TaskId(3), Status::Done));
        let after: Vec<TaskId> = store.iter().map(|t| t.id).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_set_status_missing_task() {
        let mut store = sample_store();
        assert!(!store.set_status(TaskId(99), Status::Done));
    }

    #[test]
    fn test_tasks_by_status_preserves_insertion_order() {
        let mut store = sample_store();
        store.add_task("D");
        store.set_status(TaskId(1), Status::Done);

        let todo: Vec<_> = store.tasks_by_status(Status::Todo).map(|t| t.id).collect();
        let done: Vec<_> = store.tasks_by_status(Status::Done).map(|t| t.id).collect();
        assert_eq!(todo, vec![TaskId(2), TaskId(4)]);
        assert_eq!(done, vec![TaskId(1), TaskId(3)]);
        assert_eq!(store.tasks_by_status(Status::InProgress).count(), 0);
    }

    proptest! {
        #[test]
        fn prop_add_task_grows_by_one_with_fresh_id(texts in prop::collection::vec("[a-z ]{0,12}", 1..20)) {
            let mut store = TaskStore::new();
            let mut max_id = TaskId(0);
            for text in texts {
                let before = store.len();
                match store.add_task(&text) {
                    Some(id) => {
                        prop_assert!(!text.trim().is_empty());
                        prop_assert_eq!(store.len(), before + 1);
                        prop_assert!(id > max_id);
                        prop_assert_eq!(store.find_task(id).unwrap().status, Status::Todo);
                        max_id = id;
                    }
                    None => {
                        prop_assert!(text.trim().is_empty());
                        prop_assert_eq!(store.len(), before);
                    }
                }
            }
        }

        #[test]
        fn prop_same_status_never_changes_order(idx in 0usize..3) {
            let mut store = sample_store();
            let task = store.iter().nth(idx).cloned().unwrap();
            let before: Vec<Task> = store.iter().cloned().collect();
            prop_assert!(!store.set_status(task.id, task.status));
            let after: Vec<Task> = store.iter().cloned().collect();
            prop_assert_eq!(before, after);
        }
    }
}
