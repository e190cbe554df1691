//! Shared Module
//!
//! Platform-agnostic types used by the HTTP client, the stores and the
//! desktop views. Nothing here touches the network.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Wire models for users, boards, lists and cards
pub mod models;

/// ISO-8601 and due-date helpers
pub mod timestamp;

/// Form checks run before a request is sent
pub mod validation;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use models::{Board, BoardList, Card, ChecklistItem, Label, OrderMap, User};
