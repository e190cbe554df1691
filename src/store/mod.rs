//! Client-side Stores
//!
//! Stores mirror server resources and are patched only after the server has
//! confirmed a write. A failed request records a user-facing message in the
//! store's status and leaves the data exactly as it was.
//!
//! - [`BoardStore`] - boards owned by the user and the selected board
//! - [`ListStore`] - lists of the open board; the single owner of card data,
//!   exposing card operations directly
//! - [`patch`] - the pure state transitions both stores apply
//!
//! Handles are cheap clones over shared state. Locks are released before any
//! `.await`, so overlapping requests each apply their patch when their own
//! response arrives and the last one wins.

mod boards;
mod cards;
mod lists;
pub mod patch;

pub use boards::{BoardState, BoardStore};
pub use lists::{ListState, ListStore};

/// Whether a store operation raises the loading flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Loading {
    Tracked,
    /// Drag-driven writes (move, reorder) leave the flag alone
    Untracked,
}

/// Loading and error flags of one store.
///
/// Loading is a counter of outstanding tracked operations, so the flag reads
/// true while any of them is still in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    in_flight: usize,
    error: Option<String>,
}

impl StoreStatus {
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn begin(&mut self, loading: Loading) {
        if loading == Loading::Tracked {
            self.in_flight += 1;
            self.error = None;
        }
    }

    pub(crate) fn finish(&mut self, loading: Loading) {
        if loading == Loading::Tracked {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
    }

    pub(crate) fn fail(&mut self, loading: Loading, message: String) {
        self.finish(loading);
        self.error = Some(message);
    }
}
