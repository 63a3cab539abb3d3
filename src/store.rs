use std::fmt;

use chrono::NaiveDateTime;

use crate::error::ValidationError;
use crate::models::{Task, TaskId};

/// A mutation that was applied to a [`TaskStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(TaskId),
    Removed(TaskId),
    Toggled(TaskId),
    Updated(TaskId),
}

impl Change {
    pub fn id(&self) -> TaskId {
        match *self {
            Change::Added(id) | Change::Removed(id) | Change::Toggled(id) | Change::Updated(id) => id,
        }
    }
}

type Listener = Box<dyn FnMut(&Change)>;

/// Owns the authoritative collection of tasks.
///
/// Tasks are kept in insertion order. Every applied mutation bumps
/// [`revision`](TaskStore::revision) and is reported to the subscribed
/// listeners; no-ops and rejected input are not.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    revision: u64,
    listeners: Vec<Listener>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("next_id", &self.next_id)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Checks the fields every stored task must carry.
pub fn validate(text: &str, scheduled_at: Option<NaiveDateTime>) -> Result<NaiveDateTime, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    scheduled_at.ok_or(ValidationError::MissingSchedule)
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener called after each applied mutation.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&Change) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Number of changes applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Creates a task and returns its freshly allocated id.
    ///
    /// Nothing is stored when `text` is blank or `scheduled_at` is absent.
    pub fn add(&mut self, text: impl Into<String>, scheduled_at: Option<NaiveDateTime>) -> Result<TaskId, ValidationError> {
        let text = text.into();
        let scheduled_at = validate(&text, scheduled_at).inspect_err(|e| {
            log::debug!("Rejected new task: {}", e);
        })?;

        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        log::info!("Adding task {} scheduled at {}", id, scheduled_at);
        self.tasks.push(Task {
            id,
            text,
            completed: false,
            scheduled_at,
        });
        self.notify(Change::Added(id));
        Ok(id)
    }

    /// Deletes the task with the given id. Unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) {
        let len_before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == len_before {
            log::debug!("Task {} not found, nothing to remove", id);
            return;
        }
        log::info!("Removed task {}", id);
        self.notify(Change::Removed(id));
    }

    /// Flips the completion flag of the task. Unknown ids are ignored.
    pub fn toggle_completion(&mut self, id: TaskId) {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.completed = !t.completed;
                log::info!("Task {} marked as {}", id, if t.completed { "done" } else { "pending" });
            }
            None => {
                log::debug!("Task {} not found, nothing to toggle", id);
                return;
            }
        }
        self.notify(Change::Toggled(id));
    }

    /// Overwrites the editable fields of a task, validating them like [`add`](Self::add).
    ///
    /// An unknown id is a no-op and still returns `Ok(())`.
    pub fn update_fields(&mut self, id: TaskId, text: impl Into<String>, scheduled_at: Option<NaiveDateTime>) -> Result<(), ValidationError> {
        let text = text.into();
        let scheduled_at = validate(&text, scheduled_at).inspect_err(|e| {
            log::debug!("Rejected update of task {}: {}", id, e);
        })?;

        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.text = text;
                t.scheduled_at = scheduled_at;
            }
            None => {
                log::debug!("Task {} not found, nothing to update", id);
                return Ok(());
            }
        }
        log::info!("Task {} updated", id);
        self.notify(Change::Updated(id));
        Ok(())
    }

    /// Looks up a single task by id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The current tasks, in insertion order.
    pub fn snapshot(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn notify(&mut self, change: Change) {
        self.revision += 1;
        for listener in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}
