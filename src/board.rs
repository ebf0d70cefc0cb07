// src/board.rs — Per-request task list state
//
// Holds the tasks fetched for one page render plus the user-visible error
// message, and implements the optimistic toggle: flip locally before the
// network call, revert only if that call fails.

use crate::client::types::Task;

#[derive(Debug, Default)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    error: Option<String>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, error: None }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks not yet completed, in list order.
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    /// Completed tasks, in list order.
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Append a freshly created task (exactly one new entry).
    pub fn insert(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Substitute the task with the same id, if present.
    pub fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(idx))
    }

    /// Optimistically flip the completion flag, returning the new value.
    /// Happens synchronously before the update call begins.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Restore a toggle after the update call failed.
    pub fn revert(&mut self, id: &str, previous: bool) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = previous;
        }
    }

    /// Surface a failure to the user. Each failure is reported once.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
