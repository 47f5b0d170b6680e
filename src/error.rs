//! Error types for GitHub fetches and report generation.
//!
//! Per-repository failures are reported through this type and then
//! downgraded to warnings by the aggregators; only configuration and
//! output errors reach the binary boundary.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("Unexpected content type {content_type:?} for {url}")]
    UnexpectedContentType {
        content_type: Option<String>,
        url: String,
    },

    #[error("Empty payload from {0}")]
    EmptyPayload(String),

    #[error("Failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Statistics still being computed after {attempts} attempts")]
    NotReady { attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message safe to log: never echoes request headers or bodies.
    pub fn log_safe(&self) -> String {
        match self {
            Error::Http(e) if e.is_timeout() => "GitHub request timed out".to_string(),
            Error::Http(e) if e.is_connect() => "Cannot connect to GitHub API".to_string(),
            Error::Http(_) => "GitHub request failed".to_string(),
            Error::Status { status, .. } if *status == StatusCode::UNAUTHORIZED => {
                "GitHub authentication failed (check GITHUB_TOKEN)".to_string()
            }
            other => other.to_string(),
        }
    }
}
