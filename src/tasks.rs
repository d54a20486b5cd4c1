//! Inline task editor.
//!
//! A per-item `viewing ⇄ editing` state machine. Entering edit mode copies
//! the entity's fields into a local draft; persistence is delegated to the
//! owning phase list controller, which is also where the caller wires the
//! re-fetch after a successful save.

use crate::errors::ApiError;
use crate::models::{Task, TaskStatus};
use crate::phases::PhaseListController;

/// Draft fields held while the editor is in the `editing` state.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
}

pub struct TaskEditor {
    task: Task,
    draft: Option<TaskDraft>,
}

impl TaskEditor {
    /// A new editor starts in the viewing state.
    pub fn new(task: Task) -> Self {
        Self { task, draft: None }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&TaskDraft> {
        self.draft.as_ref()
    }

    /// Enter the editing state, copying the task's current fields into the
    /// draft. Re-entering while already editing resets the draft.
    pub fn begin_edit(&mut self) {
        self.draft = Some(TaskDraft {
            name: self.task.name.clone(),
            description: self.task.description.clone().unwrap_or_default(),
            status: self.task.status,
        });
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            draft.description = description.into();
        }
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        if let Some(draft) = self.draft.as_mut() {
            draft.status = status;
        }
    }

    /// Persist the draft through the phase list controller and return to the
    /// viewing state. The draft is cleared whether or not the underlying
    /// request succeeded; there is no rollback path. The displayed entity is
    /// refreshed by the caller's re-fetch on success. `Ok(false)` when not
    /// editing.
    pub async fn save(&mut self, phases: &PhaseListController) -> Result<bool, ApiError> {
        let Some(draft) = self.draft.take() else {
            return Ok(false);
        };
        phases
            .update_task(self.task.id, &draft.name, &draft.description, draft.status)
            .await?;
        Ok(true)
    }

    /// Return to the viewing state, discarding the draft unconditionally.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Delete the underlying task. No confirmation step.
    pub async fn delete(&self, phases: &PhaseListController) -> Result<(), ApiError> {
        phases.delete_task(self.task.id).await
    }
}
