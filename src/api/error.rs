//! API Error Types
//!
//! Failures of a request against the board service. Every store records
//! `ApiError::user_message(fallback)` and then hands the error back to the
//! caller unchanged.

use thiserror::Error;

use crate::shared::error::SharedError;

/// Request failure
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or timeout; no response was received
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a 4xx/5xx status
    #[error("Request failed with status {status}")]
    Status {
        status: u16,
        /// The `detail` string of the response body, when it has one
        detail: Option<String>,
    },

    /// 401 that survived the single refresh attempt, or no refresh token held
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Response body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Rejected locally before any request was sent
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Persisted session could not be read or written
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self::Status { status, detail }
    }

    /// Text for a notification: the server's detail or a local validation
    /// message when there is one, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Validation(err) => err.user_message().to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a string `detail` out of an error body. Validation failures carry a
/// list there instead, which is ignored.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
