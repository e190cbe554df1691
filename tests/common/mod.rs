//! Common test utilities and helpers
//!
//! - JSON fixtures shaped like the board service's responses
//! - A wiremock-backed service with a throwaway storage directory

#![allow(dead_code)]

pub mod fixtures;
pub mod mock_server;

pub use fixtures::*;
pub use mock_server::*;
