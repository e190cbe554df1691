//! Card search and board statistics

use crate::shared::config::MAX_CARDS_PER_BOARD;
use crate::shared::models::BoardList;

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Every list, keeping only cards whose title contains `query`
/// (case-insensitive). An empty query keeps everything.
pub fn filter_lists(lists: &[BoardList], query: &str) -> Vec<BoardList> {
    let query = normalize(query);
    if query.is_empty() {
        return lists.to_vec();
    }
    lists
        .iter()
        .map(|list| BoardList {
            cards: list
                .cards
                .iter()
                .filter(|card| card.title.to_lowercase().contains(query.as_str()))
                .cloned()
                .collect(),
            ..list.clone()
        })
        .collect()
}

/// Number of cards matching `query`
pub fn result_count(lists: &[BoardList], query: &str) -> usize {
    let query = normalize(query);
    lists
        .iter()
        .flat_map(|list| list.cards.iter())
        .filter(|card| card.title.to_lowercase().contains(query.as_str()))
        .count()
}

/// Counts shown in the board header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    pub lists: usize,
    pub cards: usize,
}

impl BoardStats {
    pub fn of(lists: &[BoardList]) -> Self {
        Self {
            lists: lists.len(),
            cards: lists.iter().map(|list| list.cards.len()).sum(),
        }
    }

    /// The board holds as many cards as the server accepts
    pub fn at_card_limit(&self) -> bool {
        self.cards >= MAX_CARDS_PER_BOARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::fixtures::{card_ids, list};

    fn lists() -> Vec<BoardList> {
        let mut todo = list("l1", 0, &["c1", "c2"]);
        todo.cards[0].title = "Fix login bug".to_string();
        todo.cards[1].title = "Write release notes".to_string();
        let mut done = list("l2", 1, &["c3"]);
        done.cards[0].title = "Debug LOGIN flow".to_string();
        vec![todo, done]
    }

    #[test]
    fn test_filter_is_case_insensitive_and_keeps_lists() {
        let filtered = filter_lists(&lists(), "  Login ");
        assert_eq!(filtered.len(), 2);
        assert_eq!(card_ids(&filtered[0]), vec!["c1"]);
        assert_eq!(card_ids(&filtered[1]), vec!["c3"]);
        assert_eq!(result_count(&lists(), "login"), 2);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        assert_eq!(filter_lists(&lists(), ""), lists());
        assert_eq!(result_count(&lists(), ""), 3);
    }

    #[test]
    fn test_stats() {
        assert_eq!(BoardStats::of(&lists()), BoardStats { lists: 2, cards: 3 });
        assert!(!BoardStats::of(&lists()).at_card_limit());
    }

    #[test]
    fn test_card_limit() {
        let ids: Vec<String> = (0..MAX_CARDS_PER_BOARD).map(|i| format!("c{}", i)).collect();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        let full = vec![list("l1", 0, &ids)];
        assert!(BoardStats::of(&full).at_card_limit());
        assert!(!BoardStats::of(&[list("l1", 0, &ids[1..])]).at_card_limit());
    }
}
