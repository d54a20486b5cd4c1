//! Project detail controller.
//!
//! Owns the canonical client-side copy of one project aggregate plus the
//! form state around it: document upload selection, the progress-log form
//! (create/edit), the document category filter, and the transient result of
//! a document-triggered action. The server stays the single source of truth:
//! every successful mutation is followed by a full re-fetch, never a local
//! patch.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::warn;

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    AisleCount, ChartPoint, OcrField, ProgressLog, ProgressLogPayload, Project,
};

/// Result of a fire-and-forget document action, shown transiently and then
/// dismissed. Failures land here as placeholder text instead of propagating.
#[derive(Debug, Clone)]
pub enum DocumentAction {
    Ocr {
        text: String,
        extracted: Vec<OcrField>,
    },
    AisleCount(AisleCount),
}

/// Form state for creating or editing a progress log. `editing` doubles as
/// the mode switch: when set, submit issues PUT against that log and reuses
/// its original date.
#[derive(Debug, Clone, Default)]
pub struct ProgressForm {
    pub percentage_completed: i64,
    pub notes: String,
    pub editing: Option<ProgressLog>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadSelection {
    pub file: Option<PathBuf>,
    pub category: String,
}

pub struct ProjectDetailController {
    client: ApiClient,
    project_id: i64,
    project: Option<Project>,
    overall_progress: Option<f64>,
    filter_category: String,
    upload: UploadSelection,
    progress_form: ProgressForm,
    action_result: Option<DocumentAction>,
}

impl ProjectDetailController {
    pub fn new(client: ApiClient, project_id: i64) -> Self {
        Self {
            client,
            project_id,
            project: None,
            overall_progress: None,
            filter_category: String::new(),
            upload: UploadSelection::default(),
            progress_form: ProgressForm::default(),
            action_result: None,
        }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn overall_progress(&self) -> Option<f64> {
        self.overall_progress
    }

    pub fn filter_category(&self) -> &str {
        &self.filter_category
    }

    pub fn progress_form(&self) -> &ProgressForm {
        &self.progress_form
    }

    pub fn upload_selection(&self) -> &UploadSelection {
        &self.upload
    }

    pub fn action_result(&self) -> Option<&DocumentAction> {
        self.action_result.as_ref()
    }

    // ── Fetching ──────────────────────────────────────────────────────

    /// Re-fetch the project aggregate and the server-computed overall
    /// progress. The two requests are independent; each result lands in its
    /// own slot even if the other fails.
    pub async fn refetch(&mut self) -> Result<(), ApiError> {
        let (project, overall) = tokio::join!(
            self.client.get_project(self.project_id),
            self.client.get_overall_progress(self.project_id),
        );

        let mut first_err = None;
        match project {
            Ok(p) => self.project = Some(p),
            Err(e) => first_err = Some(e),
        }
        match overall {
            Ok(o) => self.overall_progress = Some(o.overall_progress),
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Change the document category filter and re-fetch the document list,
    /// patching it into the held aggregate. The query parameter is only sent
    /// when the filter is non-empty.
    pub async fn set_filter(&mut self, category: impl Into<String>) -> Result<(), ApiError> {
        self.filter_category = category.into();
        let filter = if self.filter_category.is_empty() {
            None
        } else {
            Some(self.filter_category.as_str())
        };
        let documents = self.client.list_documents(self.project_id, filter).await?;
        if let Some(project) = self.project.as_mut() {
            project.documents = documents;
        }
        Ok(())
    }

    // ── Document upload ───────────────────────────────────────────────

    pub fn select_file(&mut self, path: PathBuf) {
        self.upload.file = Some(path);
    }

    pub fn set_upload_category(&mut self, category: impl Into<String>) {
        self.upload.category = category.into();
    }

    /// Upload the selected file. A no-op returning `Ok(false)` when nothing
    /// is selected. On success re-fetches the project and clears the
    /// selection.
    pub async fn upload(&mut self) -> Result<bool, ApiError> {
        let Some(file) = self.upload.file.clone() else {
            return Ok(false);
        };
        let category = if self.upload.category.is_empty() {
            None
        } else {
            Some(self.upload.category.as_str())
        };
        self.client
            .upload_document(self.project_id, &file, category)
            .await?;
        self.refetch().await?;
        self.upload = UploadSelection::default();
        Ok(true)
    }

    // ── Progress log form ─────────────────────────────────────────────

    /// Set the percentage field, clamped to [0, 100] the way the form input
    /// constrains it. Submission does not re-validate.
    pub fn set_percentage(&mut self, value: i64) {
        self.progress_form.percentage_completed = value.clamp(0, 100);
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.progress_form.notes = notes.into();
    }

    /// Switch the form into edit mode, copying the log's current values.
    pub fn edit_progress(&mut self, log: ProgressLog) {
        self.progress_form.percentage_completed = log.percentage_completed;
        self.progress_form.notes = log.notes.clone().unwrap_or_default();
        self.progress_form.editing = Some(log);
    }

    /// Leave edit mode and reset the form without persisting anything.
    pub fn cancel_edit(&mut self) {
        self.progress_form = ProgressForm::default();
    }

    /// Submit the progress form: PUT against the edit target with its
    /// original date when editing, otherwise POST with today's date. On
    /// success re-fetches and resets the form.
    pub async fn submit_progress(&mut self) -> Result<(), ApiError> {
        let payload = ProgressLogPayload {
            date: match &self.progress_form.editing {
                Some(log) => log.date,
                None => Local::now().date_naive(),
            },
            percentage_completed: self.progress_form.percentage_completed,
            notes: self.progress_form.notes.clone(),
        };
        match &self.progress_form.editing {
            Some(log) => {
                self.client.update_progress_log(log.id, &payload).await?;
            }
            None => {
                self.client
                    .create_progress_log(self.project_id, &payload)
                    .await?;
            }
        }
        self.refetch().await?;
        self.progress_form = ProgressForm::default();
        Ok(())
    }

    /// Delete a progress log. Re-fetches only when the delete succeeded, so a
    /// rejected delete leaves the displayed list untouched.
    pub async fn delete_progress(&mut self, log_id: i64) -> Result<(), ApiError> {
        self.client.delete_progress_log(log_id).await?;
        self.refetch().await
    }

    // ── Document-triggered actions ────────────────────────────────────

    /// Run OCR on a document. The outcome, success or not, is stored in the
    /// transient result slot; request failures become placeholder text.
    pub async fn run_ocr(&mut self, document_id: i64) {
        self.action_result = Some(match self.client.run_ocr(document_id).await {
            Ok(outcome) => match outcome.ocr_text {
                Some(text) => DocumentAction::Ocr {
                    text,
                    extracted: outcome.extracted_data,
                },
                None => DocumentAction::Ocr {
                    text: "OCR failed or no text found.".to_string(),
                    extracted: Vec::new(),
                },
            },
            Err(e) => {
                warn!(document_id, error = %e, "OCR request failed");
                DocumentAction::Ocr {
                    text: "Error during OCR.".to_string(),
                    extracted: Vec::new(),
                }
            }
        });
    }

    /// Count warehouse aisles on a document drawing, same transient-slot
    /// semantics as OCR.
    pub async fn count_aisles(&mut self, document_id: i64) {
        self.action_result = Some(match self.client.count_aisles(document_id).await {
            Ok(count) => DocumentAction::AisleCount(count),
            Err(e) => {
                warn!(document_id, error = %e, "aisle count request failed");
                DocumentAction::AisleCount(AisleCount {
                    num_aisles: 0,
                    message: "Chyba při počítání uliček.".to_string(),
                })
            }
        });
    }

    pub fn dismiss_result(&mut self) {
        self.action_result = None;
    }

    // ── Derived views ─────────────────────────────────────────────────

    /// Progress logs projected to `{date, percentage}` pairs, sorted
    /// ascending by date. The sort is stable: logs sharing a date keep their
    /// original relative order. Empty when no project is loaded or it has no
    /// logs; the view renders a placeholder in that case.
    pub fn chart_data(&self) -> Vec<ChartPoint> {
        let Some(project) = &self.project else {
            return Vec::new();
        };
        let mut logs: Vec<&ProgressLog> = project.progress_logs.iter().collect();
        logs.sort_by_key(|log| log.date);
        logs.into_iter()
            .map(|log| ChartPoint {
                date: log.date,
                percentage: log.percentage_completed,
            })
            .collect()
    }
}

/// Today's date in the `YYYY-MM-DD` form the backend expects for new logs.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
