//! Phase and task list controller.
//!
//! Orchestrates phase CRUD and the nested per-phase task forms. Mutations go
//! straight to the backend; the caller re-fetches the parent aggregate after
//! any success, which is how the parent's state stays consistent without the
//! controller ever patching it locally.

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{NewTaskPayload, Phase, PhasePayload, TaskPayload, TaskStatus};

/// Locally held draft of the phase currently being edited inline.
#[derive(Debug, Clone)]
pub struct PhaseDraft {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Creation form for a new phase, scoped to one project.
#[derive(Debug, Clone, Default)]
pub struct NewPhaseForm {
    pub name: String,
    pub description: String,
}

pub struct PhaseListController {
    client: ApiClient,
    project_id: i64,
    new_phase: NewPhaseForm,
    editing: Option<PhaseDraft>,
}

impl PhaseListController {
    pub fn new(client: ApiClient, project_id: i64) -> Self {
        Self {
            client,
            project_id,
            new_phase: NewPhaseForm::default(),
            editing: None,
        }
    }

    pub fn new_phase_form(&self) -> &NewPhaseForm {
        &self.new_phase
    }

    pub fn editing(&self) -> Option<&PhaseDraft> {
        self.editing.as_ref()
    }

    pub fn set_new_phase_name(&mut self, name: impl Into<String>) {
        self.new_phase.name = name.into();
    }

    pub fn set_new_phase_description(&mut self, description: impl Into<String>) {
        self.new_phase.description = description.into();
    }

    // ── Phase CRUD ────────────────────────────────────────────────────

    /// POST the creation form verbatim and clear it on success. There is no
    /// blank-name guard here; the backend accepts an empty name (see
    /// DESIGN.md for why this asymmetry with task creation is kept).
    pub async fn add_phase(&mut self) -> Result<Phase, ApiError> {
        let payload = PhasePayload {
            name: self.new_phase.name.clone(),
            description: self.new_phase.description.clone(),
        };
        let phase = self.client.create_phase(self.project_id, &payload).await?;
        self.new_phase = NewPhaseForm::default();
        Ok(phase)
    }

    /// Enter inline edit mode for a phase, copying its current fields into
    /// the draft.
    pub fn begin_edit(&mut self, phase: &Phase) {
        self.editing = Some(PhaseDraft {
            id: phase.id,
            name: phase.name.clone(),
            description: phase.description.clone().unwrap_or_default(),
        });
    }

    pub fn set_edit_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.name = name.into();
        }
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.editing.as_mut() {
            draft.description = description.into();
        }
    }

    /// PUT the edited name and description, then leave edit mode. A no-op
    /// when nothing is being edited.
    pub async fn save_edit(&mut self) -> Result<Option<Phase>, ApiError> {
        let Some(draft) = self.editing.clone() else {
            return Ok(None);
        };
        let payload = PhasePayload {
            name: draft.name,
            description: draft.description,
        };
        let phase = self.client.update_phase(draft.id, &payload).await?;
        self.editing = None;
        Ok(Some(phase))
    }

    /// Discard the draft without persisting.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn delete_phase(&mut self, phase_id: i64) -> Result<(), ApiError> {
        self.client.delete_phase(phase_id).await
    }

    // ── Nested task operations ────────────────────────────────────────

    /// Create a task under a phase. A blank post-trim name makes this a
    /// no-op: no request is issued and `Ok(false)` is returned.
    pub async fn add_task(
        &self,
        phase_id: i64,
        name: &str,
        description: &str,
    ) -> Result<bool, ApiError> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let payload = NewTaskPayload {
            name: name.to_string(),
            description: description.to_string(),
        };
        self.client.create_task(phase_id, &payload).await?;
        Ok(true)
    }

    /// Persist a task edit on behalf of a task editor.
    pub async fn update_task(
        &self,
        task_id: i64,
        name: &str,
        description: &str,
        status: TaskStatus,
    ) -> Result<(), ApiError> {
        let payload = TaskPayload {
            name: name.to_string(),
            description: description.to_string(),
            status,
        };
        self.client.update_task(task_id, &payload).await?;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), ApiError> {
        self.client.delete_task(task_id).await
    }
}
