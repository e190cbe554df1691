//! Service Models
//!
//! Resources exchanged with the board service, plus the request payloads the
//! client sends. Identifiers are opaque strings issued by the server.

pub mod user;
pub mod board;
pub mod list;
pub mod card;
pub mod order;

pub use user::{LoginCredentials, RefreshRequest, RegisterData, TokenResponse, User};
pub use board::{Board, BoardCreate, BoardListResponse, BoardUpdate, ColorPreset, BOARD_COLOR_PRESETS, DEFAULT_BOARD_COLOR};
pub use list::{BoardList, ListCreate, ListReorder, ListUpdate};
pub use card::{Card, CardCreate, CardMove, CardReorder, CardUpdate, ChecklistItem, Label};
pub use order::OrderMap;

#[cfg(test)]
pub(crate) mod fixtures;
