//! Debug utilities and helpers
//!
//! Invariant checks run after local store patches. They only fire in debug
//! builds; release builds compile them down to nothing but the condition.

use crate::shared::models::BoardList;

/// Debug mode feature flag
pub const DEBUG_MODE: bool = cfg!(debug_assertions);

/// Debug log macro
///
/// Only logs in debug builds.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            tracing::debug!($($arg)*);
        }
    };
}

/// Validate state invariant
///
/// Checks a state invariant and logs an error if it fails.
/// Only active in debug builds.
pub fn validate_invariant(condition: bool, message: &str) {
    if DEBUG_MODE && !condition {
        tracing::error!("Invariant violation: {}", message);
        #[cfg(debug_assertions)]
        {
            panic!("Invariant violation: {}", message);
        }
    }
}

/// Orders are non-decreasing along the sequence
pub fn is_sorted_by_order<T>(items: &[T], order: impl Fn(&T) -> i64) -> bool {
    items.windows(2).all(|pair| order(&pair[0]) <= order(&pair[1]))
}

/// How many lists hold `card_id`
pub fn card_occurrences(lists: &[BoardList], card_id: &str) -> usize {
    lists
        .iter()
        .flat_map(|list| list.cards.iter())
        .filter(|card| card.id == card_id)
        .count()
}
