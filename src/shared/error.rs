//! Shared Error Types
//!
//! Errors raised before any request is sent: form validation, due-date
//! parsing and JSON handling. These never involve the network, so they are
//! surfaced to the user immediately.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A form field failed a local check
//! - `InvalidDate` - A due-date input could not be interpreted
//!
//! # Usage
//!
//! ```rust
//! use taskboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title must be at least 3 characters");
//! assert_eq!(error.user_message(), "Title must be at least 3 characters");
//! ```
use thiserror::Error;

/// Local, pre-request error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Due-date input that does not describe a real instant
    #[error("Invalid date '{input}': {message}")]
    InvalidDate {
        /// The raw text the user typed
        input: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new date error
    pub fn invalid_date(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// The text shown in a notification, without the variant prefix
    pub fn user_message(&self) -> &str {
        match self {
            Self::SerializationError { message }
            | Self::ValidationError { message, .. }
            | Self::InvalidDate { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
