//! Taskboard - Kanban Board Client
//!
//! Taskboard is a native client for a kanban-style task board service
//! (boards → lists → cards). The server owns every business rule; this crate
//! mirrors its REST resources into local stores and patches them after each
//! confirmed write, without a full refetch.
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Board, list, card and user models
//!   - Configuration, shared error types
//!   - Timestamp and due-date helpers, form validation
//!
//! - **`api`** - HTTP client collaborator
//!   - Bearer token injection
//!   - One silent refresh-and-retry on 401
//!
//! - **`session`** - Session store (login, register, logout, refresh) and its
//!   persisted subset
//!
//! - **`store`** - Board store and the list store that owns all card data
//!
//! - **`board_view`** - Drag-and-drop planning, keyboard focus, search
//!
//! - **`egui_app`** - Native desktop front end (egui/eframe)
//!
//! # Data Flow
//!
//! Reads flow network → store → view. Writes wait for the server response and
//! then patch the affected store; there is no speculative update and therefore
//! no rollback path. A failed write leaves the store exactly as it was.
//!
//! # Usage
//!
//! ```rust,no_run
//! use taskboard::api::ApiClient;
//! use taskboard::shared::config::AppConfig;
//! use taskboard::store::ListStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(AppConfig::from_env()?)?;
//! let lists = ListStore::new(api.clone());
//! lists.fetch_lists("board-id").await?;
//! println!("{} cards loaded", lists.snapshot().card_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Store handles are cheap clones over `Arc<RwLock<_>>`. No lock is held across
//! an `.await`, so overlapping operations interleave and the response that
//! arrives last wins.

/// Shared types and data structures
pub mod shared;

/// HTTP client for the board service
pub mod api;

/// Authentication session
pub mod session;

/// Board, list and card stores
pub mod store;

/// View-level board logic (drag-and-drop, keyboard focus, search)
pub mod board_view;

/// egui native desktop app
pub mod egui_app;

/// Debug utilities (invariant checks)
pub mod debug;
