//! egui Native Desktop App Module
//!
//! The desktop front end over the stores: sign in, the boards grid and the
//! board page.
//!
//! # Architecture
//!
//! - **`state`** - [`AppState`], owner of the stores and the request event loop
//! - **`forms`** - form inputs and their conversion into request bodies
//! - **`types`** - view enum and background request events
//! - **`views`** - one renderer per screen
//! - **`theme`** - colours and frames
//! - **`main`** - binary entry point
//!
//! ```text
//! egui_app/
//! ├── mod.rs
//! ├── main.rs
//! ├── forms.rs
//! ├── types.rs
//! ├── state/
//! ├── theme/
//! └── views/
//! ```

pub mod forms;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

pub use state::AppState;
pub use types::{AppEvent, AppView, FormKind};
