//! Theme Module
//!
//! Colour palette and frame builders for the board UI.
//!
//! - Color constants for panels, columns, cards and labels
//! - Styling helper functions for consistent UI appearance

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
