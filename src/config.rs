//! Application configuration and environment variable parsing.
//!
//! Settings come from the environment (optionally seeded from a `.env` file).
//! The GitHub token may be given directly or through a secret file; a missing
//! token is reported to whoever asks for it instead of stopping the service.

use crate::error::FetchError;
use crate::github::DEFAULT_API_URL;
use serde::Deserialize;
use std::fs;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// The GitHub login whose contribution calendar is served.
    pub github_username: String,

    /// GitHub Personal Access Token used as the bearer credential.
    pub github_token: Option<String>,

    /// Path to a file holding the token. Only read when `github_token` is unset.
    pub github_token_file: Option<String>,

    /// Base URL of the GitHub API. Defaults to the public API.
    #[serde(default = "default_api_url")]
    pub github_api_url: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to fetch once as soon as the service starts.
    #[serde(default = "default_fetch_on_startup")]
    pub fetch_on_startup: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_fetch_on_startup() -> bool {
    true
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Returns the configured token, reading the token file if needed.
    pub fn resolve_token(&self) -> Result<String, FetchError> {
        if let Some(token) = non_empty(self.github_token.as_deref()) {
            return Ok(token);
        }

        let Some(path) = &self.github_token_file else {
            return Err(FetchError::MissingCredential);
        };

        match fs::read_to_string(path) {
            Ok(contents) => non_empty(Some(&contents)).ok_or(FetchError::MissingCredential),
            Err(e) => {
                tracing::warn!(path = %path, "Could not read GitHub token file: {}", e);
                Err(FetchError::MissingCredential)
            }
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
