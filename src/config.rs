//! Client configuration.
//!
//! The API base URL is resolved from, in order: the `--api-url` CLI flag,
//! the `SITETRACK_API_URL` environment variable (after loading `.env`), the
//! user config file at `~/.config/sitetrack/config.toml`, and finally the
//! local development default.

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::ConfigError;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// On-disk config file shape. All fields optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub api_url: Option<String>,
    pub default_project: Option<i64>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub default_project: Option<i64>,
}

impl Config {
    /// Resolve configuration from all sources. `cli_api_url` is the value of
    /// the `--api-url` flag, which wins over everything else.
    pub fn load(cli_api_url: Option<&str>) -> Result<Self, ConfigError> {
        // A missing .env file is fine.
        dotenvy::dotenv().ok();
        let file = Self::read_config_file()?;
        let env_url = std::env::var("SITETRACK_API_URL").ok();
        let api_url = resolve_api_url(cli_api_url, env_url.as_deref(), &file)?;
        Ok(Self {
            api_url,
            default_project: file.default_project,
        })
    }

    fn read_config_file() -> Result<ConfigFile, ConfigError> {
        let Some(path) = Self::config_path() else {
            return Ok(ConfigFile::default());
        };
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::ParseFailed { path, source })
    }

    /// `~/.config/sitetrack/config.toml` (platform equivalent via `dirs`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitetrack").join("config.toml"))
    }
}

fn resolve_api_url(
    cli: Option<&str>,
    env: Option<&str>,
    file: &ConfigFile,
) -> Result<String, ConfigError> {
    let url = cli
        .map(str::to_string)
        .or_else(|| env.map(str::to_string))
        .or_else(|| file.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::InvalidBaseUrl(url));
    }
    Ok(url)
}
