//! Error types for talking to the applications backend

use thiserror::Error;

/// Why a page fetch failed.
///
/// The list controller shows the same message for every variant; the
/// distinction only reaches the logs.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("applications API returned status {status_code}")]
    Status { status_code: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse applications response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Http(e) if e.is_timeout())
    }
}
