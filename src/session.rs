use chrono::NaiveDateTime;

use crate::error::ValidationError;
use crate::models::{Task, TaskId};
use crate::store::TaskStore;

/// Scratch copy of the editable fields of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub task_id: TaskId,
    pub text: String,
    pub scheduled_at: Option<NaiveDateTime>,
}

/// Tracks the single task currently being edited, if any.
///
/// The draft lives apart from the store: nothing reaches the task until
/// [`commit`](EditSession::commit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Draft),
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing `task`, silently dropping any draft in progress.
    pub fn start(&mut self, task: &Task) {
        if let EditSession::Editing(previous) = self {
            if previous.task_id != task.id {
                log::debug!("Abandoning draft of task {}", previous.task_id);
            }
        }
        log::debug!("Editing task {}", task.id);
        *self = EditSession::Editing(Draft {
            task_id: task.id,
            text: task.text.clone(),
            scheduled_at: Some(task.scheduled_at),
        });
    }

    /// Replaces the draft description. Returns `false` when idle.
    pub fn update_draft_text(&mut self, value: impl Into<String>) -> bool {
        match self {
            EditSession::Editing(draft) => {
                draft.text = value.into();
                true
            }
            EditSession::Idle => false,
        }
    }

    /// Replaces the draft schedule. Returns `false` when idle.
    pub fn update_draft_schedule(&mut self, value: Option<NaiveDateTime>) -> bool {
        match self {
            EditSession::Editing(draft) => {
                draft.scheduled_at = value;
                true
            }
            EditSession::Idle => false,
        }
    }

    /// Writes the draft back into the store and returns to idle.
    ///
    /// The session ends whether or not the draft passes validation; the
    /// outcome is returned so the caller can decide whether to show it.
    /// Committing while idle yields `Ok(None)`.
    pub fn commit(&mut self, store: &mut TaskStore) -> Result<Option<TaskId>, ValidationError> {
        let draft = match std::mem::take(self) {
            EditSession::Editing(draft) => draft,
            EditSession::Idle => return Ok(None),
        };
        log::debug!("Committing draft of task {}", draft.task_id);
        store.update_fields(draft.task_id, draft.text, draft.scheduled_at)?;
        Ok(Some(draft.task_id))
    }

    /// Drops the draft without touching the store.
    pub fn cancel(&mut self) {
        if let EditSession::Editing(draft) = std::mem::take(self) {
            log::debug!("Cancelled edit of task {}", draft.task_id);
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.draft().map(|d| d.task_id)
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditSession::Editing(draft) => Some(draft),
            EditSession::Idle => None,
        }
    }

    pub fn draft_text(&self) -> Option<&str> {
        self.draft().map(|d| d.text.as_str())
    }

    pub fn draft_schedule(&self) -> Option<NaiveDateTime> {
        self.draft().and_then(|d| d.scheduled_at)
    }
}
