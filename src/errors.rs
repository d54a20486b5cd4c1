//! Typed error hierarchy for the sitetrack client.
//!
//! Two top-level enums cover the two subsystems:
//! - `ApiError`: REST transport, status, and decode failures
//! - `ConfigError`: configuration resolution failures

use thiserror::Error;

/// Errors from the REST client.
///
/// Any non-2xx response becomes `Status`; the backend sometimes returns a
/// parseable JSON error body, and callers must not mistake that for success.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server returned {status} for {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read file at {path}: {source}")]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status code of the failure, if the server got far enough to
    /// send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from configuration resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    ReadFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ParseFailed {
        path: std::path::PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
