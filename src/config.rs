//! Run configuration.
//!
//! The repository coordinates are compiled in; only the API token comes from
//! the environment. Everything is collected into [`Config`] once at startup
//! and handed to the client, so nothing downstream reads process state.

use std::path::PathBuf;

pub const REPO_OWNER: &str = "hari7261";
pub const REPO_NAME: &str = "Hacktoberfest-2025";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub token: Option<String>,
    pub api_base: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Build the configuration for a normal run, reading `GITHUB_TOKEN`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(TOKEN_ENV_VAR).ok())
    }

    pub fn new(token: Option<String>) -> Self {
        Self {
            owner: REPO_OWNER.to_string(),
            repo: REPO_NAME.to_string(),
            token: normalize_token(token),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("."),
        }
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// `owner/name` identifier used in the report.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}

// An exported-but-empty variable must not produce an empty Authorization header.
fn normalize_token(token: Option<String>) -> Option<String> {
    token
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
