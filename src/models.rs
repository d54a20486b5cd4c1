use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A construction project aggregate as served by the backend.
/// The client never mutates this directly; children mutate through their own
/// endpoints and the whole aggregate is re-fetched afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub progress_logs: Vec<ProgressLog>,
    #[serde(default)]
    pub phases: Vec<Phase>,
}

/// A milestone container within a project, owning an id-ordered task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub phase_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

/// An uploaded document. `extracted_data` is filled in asynchronously by the
/// OCR collaborator and is empty until that has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: i64,
    pub project_id: i64,
    pub filename: String,
    pub category: Option<String>,
    #[serde(default)]
    pub extracted_data: Vec<ExtractedField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField {
    pub key: String,
    pub value: String,
}

/// A dated snapshot of percent-completion plus free-text notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressLog {
    pub id: i64,
    pub project_id: i64,
    pub date: NaiveDate,
    pub percentage_completed: i64,
    pub notes: Option<String>,
}

/// Server-computed aggregate percentage, independent of any single log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallProgress {
    pub overall_progress: f64,
}

// ── Request payloads ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhasePayload {
    pub name: String,
    pub description: String,
}

/// Creation payload. Status is omitted and defaults to `pending` on the
/// server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskPayload {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressLogPayload {
    pub date: NaiveDate,
    pub percentage_completed: i64,
    pub notes: String,
}

// ── Collaborator responses ────────────────────────────────────────────

/// Result of the OCR collaborator. `ocr_text` is absent when the service
/// found no text in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrOutcome {
    pub ocr_text: Option<String>,
    #[serde(default)]
    pub extracted_data: Vec<OcrField>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrField {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AisleCount {
    pub num_aisles: i64,
    pub message: String,
}

/// One point of the progress chart series, derived from a progress log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub percentage: i64,
}
