//! Error kinds surfaced by the fetch and persist steps.

use std::path::PathBuf;

#[derive(Debug)]
pub enum StatsError {
    /// Transport failure: connection refused, TLS, body read aborted
    Request { url: String, source: reqwest::Error },
    /// The API answered with something other than 200 OK
    HttpStatus { url: String, status: u16 },
    /// The body was not the JSON shape we expected
    Decode {
        url: String,
        source: serde_json::Error,
    },
    /// Writing the report file failed
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StatsError {
    /// HTTP status carried by an `HttpStatus` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            StatsError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl std::fmt::Display for StatsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsError::Request { url, source } => {
                write!(f, "Request to {} failed: {}", url, source)
            }
            StatsError::HttpStatus { url, status } => {
                write!(f, "API request to {} failed with status: {}", url, status)
            }
            StatsError::Decode { url, source } => {
                write!(f, "Failed to decode response from {}: {}", url, source)
            }
            StatsError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::Request { source, .. } => Some(source),
            StatsError::HttpStatus { .. } => None,
            StatsError::Decode { source, .. } => Some(source),
            StatsError::Write { source, .. } => Some(source),
        }
    }
}
