//! Typed REST client for the project-tracking backend.
//!
//! One method per endpoint of the backend contract. Every method treats a
//! non-2xx response as a failure (`ApiError::Status`) even when the body is
//! parseable JSON, because the backend reports some errors that way.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;
use crate::models::{
    AisleCount, Document, NewTaskPayload, OcrOutcome, OverallProgress, Phase, PhasePayload,
    ProgressLog, ProgressLogPayload, Project, Task, TaskPayload,
};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request, enforce a 2xx status, and decode the JSON body.
    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        let resp = self.check(req, url).await?;
        resp.json::<T>().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Send a request and enforce a 2xx status, discarding the body.
    async fn send_ok(&self, req: reqwest::RequestBuilder, url: &str) -> Result<(), ApiError> {
        self.check(req, url).await.map(|_| ())
    }

    async fn check(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        debug!(url, "issuing request");
        let resp = req.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            debug!(url, status = status.as_u16(), "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(resp)
    }

    // ── Project ───────────────────────────────────────────────────────

    pub async fn get_project(&self, id: i64) -> Result<Project, ApiError> {
        let url = self.url(&format!("/api/projects/{}", id));
        self.send_json(self.http.get(&url), &url).await
    }

    pub async fn get_overall_progress(&self, id: i64) -> Result<OverallProgress, ApiError> {
        let url = self.url(&format!("/api/projects/{}/overall_progress/", id));
        self.send_json(self.http.get(&url), &url).await
    }

    // ── Documents ─────────────────────────────────────────────────────

    /// List a project's documents. The `category` query parameter is appended
    /// only when the filter is non-empty.
    pub async fn list_documents(
        &self,
        project_id: i64,
        category: Option<&str>,
    ) -> Result<Vec<Document>, ApiError> {
        let url = self.url(&format!("/api/projects/{}/documents/", project_id));
        let mut req = self.http.get(&url);
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            req = req.query(&[("category", category)]);
        }
        self.send_json(req, &url).await
    }

    /// Upload a single file with an optional category as a multipart payload.
    pub async fn upload_document(
        &self,
        project_id: i64,
        file_path: &Path,
        category: Option<&str>,
    ) -> Result<Document, ApiError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|source| ApiError::FileRead {
                path: file_path.to_path_buf(),
                source,
            })?;
        let filename = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        let mime = mime_guess::from_path(file_path).first_or_octet_stream();
        let url = self.url(&format!("/api/projects/{}/uploadfile/", project_id));

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(filename)
            .mime_str(mime.as_ref())
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(category) = category.filter(|c| !c.is_empty()) {
            form = form.text("category", category.to_string());
        }

        self.send_json(self.http.post(&url).multipart(form), &url)
            .await
    }

    /// Fetch the raw bytes of a stored document.
    pub async fn download_document(&self, document_id: i64) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/api/documents/{}/download", document_id));
        let resp = self.check(self.http.get(&url), &url).await?;
        let bytes = resp.bytes().await.map_err(|source| ApiError::Decode {
            url: url.clone(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    pub async fn run_ocr(&self, document_id: i64) -> Result<OcrOutcome, ApiError> {
        let url = self.url(&format!("/api/documents/{}/ocr", document_id));
        self.send_json(self.http.post(&url), &url).await
    }

    pub async fn count_aisles(&self, document_id: i64) -> Result<AisleCount, ApiError> {
        let url = self.url(&format!("/api/documents/{}/count_aisles", document_id));
        self.send_json(self.http.post(&url), &url).await
    }

    // ── Progress logs ─────────────────────────────────────────────────

    pub async fn create_progress_log(
        &self,
        project_id: i64,
        payload: &ProgressLogPayload,
    ) -> Result<ProgressLog, ApiError> {
        let url = self.url(&format!("/api/projects/{}/progress_logs/", project_id));
        self.send_json(self.http.post(&url).json(payload), &url)
            .await
    }

    pub async fn update_progress_log(
        &self,
        log_id: i64,
        payload: &ProgressLogPayload,
    ) -> Result<ProgressLog, ApiError> {
        let url = self.url(&format!("/api/progress_logs/{}", log_id));
        self.send_json(self.http.put(&url).json(payload), &url)
            .await
    }

    pub async fn delete_progress_log(&self, log_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/progress_logs/{}", log_id));
        self.send_ok(self.http.delete(&url), &url).await
    }

    // ── Phases ────────────────────────────────────────────────────────

    pub async fn create_phase(
        &self,
        project_id: i64,
        payload: &PhasePayload,
    ) -> Result<Phase, ApiError> {
        let url = self.url(&format!("/api/projects/{}/phases/", project_id));
        self.send_json(self.http.post(&url).json(payload), &url)
            .await
    }

    pub async fn update_phase(
        &self,
        phase_id: i64,
        payload: &PhasePayload,
    ) -> Result<Phase, ApiError> {
        let url = self.url(&format!("/api/phases/{}", phase_id));
        self.send_json(self.http.put(&url).json(payload), &url)
            .await
    }

    pub async fn delete_phase(&self, phase_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/phases/{}", phase_id));
        self.send_ok(self.http.delete(&url), &url).await
    }

    // ── Tasks ─────────────────────────────────────────────────────────

    pub async fn create_task(
        &self,
        phase_id: i64,
        payload: &NewTaskPayload,
    ) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/phases/{}/tasks/", phase_id));
        self.send_json(self.http.post(&url).json(payload), &url)
            .await
    }

    pub async fn update_task(&self, task_id: i64, payload: &TaskPayload) -> Result<Task, ApiError> {
        let url = self.url(&format!("/api/tasks/{}", task_id));
        self.send_json(self.http.put(&url).json(payload), &url)
            .await
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/tasks/{}", task_id));
        self.send_ok(self.http.delete(&url), &url).await
    }
}
