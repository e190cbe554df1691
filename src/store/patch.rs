//! Local State Patches
//!
//! Pure transitions applied to the list/card state once the server has
//! confirmed a write. Each takes the current lists and returns the new ones;
//! the store swaps the result in under a single write lock.
//!
//! Sorting is stable, so siblings sharing an `order` keep their relative
//! position.

use crate::shared::models::{BoardList, Card, OrderMap};

fn sort_lists(lists: &mut [BoardList]) {
    lists.sort_by_key(|list| list.order);
}

fn sort_cards(cards: &mut [Card]) {
    cards.sort_by_key(|card| card.order);
}

/// Append a newly created list; it starts without cards
pub fn append_list(lists: &[BoardList], mut created: BoardList) -> Vec<BoardList> {
    created.cards = Vec::new();
    let mut next = lists.to_vec();
    next.push(created);
    next
}

/// Replace a list's own fields, keeping the cards already held for it
pub fn update_list(lists: &[BoardList], updated: BoardList) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            if list.id == updated.id {
                BoardList {
                    cards: list.cards.clone(),
                    ..updated.clone()
                }
            } else {
                list.clone()
            }
        })
        .collect()
}

pub fn remove_list(lists: &[BoardList], list_id: &str) -> Vec<BoardList> {
    lists.iter().filter(|list| list.id != list_id).cloned().collect()
}

/// Assign `order` from the mapping (lists not named keep theirs) and re-sort
pub fn reorder_lists(lists: &[BoardList], list_orders: &OrderMap) -> Vec<BoardList> {
    let mut next: Vec<BoardList> = lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            if let Some(order) = list_orders.get(&list.id) {
                list.order = order;
            }
            list
        })
        .collect();
    sort_lists(&mut next);
    next
}

/// Append a created card to the end of its list
pub fn append_card(lists: &[BoardList], list_id: &str, created: Card) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            if list.id == list_id {
                list.cards.push(created.clone());
            }
            list
        })
        .collect()
}

/// Replace the card with the same id in whichever list holds it
pub fn replace_card(lists: &[BoardList], updated: &Card) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            for card in list.cards.iter_mut().filter(|card| card.id == updated.id) {
                *card = updated.clone();
            }
            list
        })
        .collect()
}

pub fn remove_card(lists: &[BoardList], card_id: &str) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            list.cards.retain(|card| card.id != card_id);
            list
        })
        .collect()
}

/// Drop every copy of the card, then place the returned card in the target
/// list ahead of any sibling sharing its `order`.
///
/// The source list is never assumed: the removal runs over all lists so a
/// stale view of where the card lived cannot leave a duplicate behind.
pub fn move_card(lists: &[BoardList], card_id: &str, target_list_id: &str, moved: Card) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            list.cards.retain(|card| card.id != card_id && card.id != moved.id);
            if list.id == target_list_id {
                sort_cards(&mut list.cards);
                let at = list.cards.partition_point(|card| card.order < moved.order);
                list.cards.insert(at, moved.clone());
            }
            list
        })
        .collect()
}

/// Assign card `order` within one list from the mapping and re-sort it
pub fn reorder_cards(lists: &[BoardList], list_id: &str, card_orders: &OrderMap) -> Vec<BoardList> {
    lists
        .iter()
        .map(|list| {
            let mut list = list.clone();
            if list.id == list_id {
                for card in list.cards.iter_mut() {
                    if let Some(order) = card_orders.get(&card.id) {
                        card.order = order;
                    }
                }
                sort_cards(&mut list.cards);
            }
            list
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::fixtures::{card, card_ids, list};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_append_list_forces_empty_cards() {
        let mut created = list("l2", 1, &["stray"]);
        created.title = "Doing".to_string();
        let next = append_list(&[list("l1", 0, &["c1"])], created);
        assert_eq!(next.len(), 2);
        assert!(next[1].cards.is_empty());
        assert_eq!(card_ids(&next[0]), vec!["c1"]);
    }

    #[test]
    fn test_update_list_keeps_cards() {
        let lists = vec![list("l1", 0, &["c1", "c2"])];
        let mut updated = list("l1", 0, &[]);
        updated.title = "Renamed".to_string();
        let next = update_list(&lists, updated);
        assert_eq!(next[0].title, "Renamed");
        assert_eq!(card_ids(&next[0]), vec!["c1", "c2"]);
    }

    #[test]
    fn test_reorder_lists_applies_mapping_and_sorts() {
        let lists = vec![list("a", 0, &[]), list("b", 1, &[]), list("c", 2, &[])];
        let next = reorder_lists(&lists, &OrderMap::dense(["c", "a", "b"]));
        let ids: Vec<_> = next.iter().map(|l| (l.id.as_str(), l.order)).collect();
        assert_eq!(ids, vec![("c", 0), ("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_reorder_cards_leaves_unlisted_orders() {
        let lists = vec![list("l1", 0, &["c1", "c2", "c3"])];
        let partial: OrderMap = [("c3", 0)].into_iter().collect();
        let next = reorder_cards(&lists, "l1", &partial);
        let orders: Vec<_> = next[0].cards.iter().map(|c| (c.id.as_str(), c.order)).collect();
        // c1 keeps 0 and stays ahead of c3 on the tie
        assert_eq!(orders, vec![("c1", 0), ("c3", 0), ("c2", 1)]);
    }

    #[test]
    fn test_reorder_cards_example_scenario() {
        let lists = vec![list("A", 0, &["c1", "c2", "c3"])];
        let next = reorder_cards(&lists, "A", &OrderMap::dense(["c3", "c1", "c2"]));
        assert_eq!(card_ids(&next[0]), vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn test_replace_card_searches_all_lists() {
        let lists = vec![list("l1", 0, &["c1"]), list("l2", 1, &["c2"])];
        let mut updated = card("c2", "l2", 0);
        updated.title = "Edited".to_string();
        let next = replace_card(&lists, &updated);
        assert_eq!(next[1].cards[0].title, "Edited");
        assert_eq!(next[0], lists[0]);
    }

    #[test]
    fn test_remove_card_from_whichever_list() {
        let lists = vec![list("l1", 0, &["c1"]), list("l2", 1, &["c2", "c3"])];
        let next = remove_card(&lists, "c2");
        assert_eq!(card_ids(&next[1]), vec!["c3"]);
    }

    #[test]
    fn test_move_card_between_lists() {
        let lists = vec![list("A", 0, &["c1"]), list("B", 1, &["d1", "d2"])];
        let next = move_card(&lists, "c1", "B", card("c1", "B", 1));
        assert!(next[0].cards.is_empty());
        assert_eq!(card_ids(&next[1]), vec!["d1", "c1", "d2"]);
    }

    #[test]
    fn test_move_card_clears_stale_duplicates() {
        let mut lists = vec![list("A", 0, &["c1"]), list("B", 1, &["d1"])];
        lists[1].cards.push(card("c1", "B", 5));
        let next = move_card(&lists, "c1", "B", card("c1", "B", 0));
        assert_eq!(crate::debug::card_occurrences(&next, "c1"), 1);
        assert_eq!(card_ids(&next[1]), vec!["c1", "d1"]);
    }

    #[test]
    fn test_move_card_past_end_appends() {
        let lists = vec![list("A", 0, &["c1"]), list("B", 1, &["d1"])];
        let next = move_card(&lists, "c1", "B", card("c1", "B", 9));
        assert_eq!(card_ids(&next[1]), vec!["d1", "c1"]);
    }

    #[test]
    fn test_append_card_to_named_list_only() {
        let lists = vec![list("l1", 0, &[]), list("l2", 1, &[])];
        let next = append_card(&lists, "l2", card("c9", "l2", 0));
        assert!(next[0].cards.is_empty());
        assert_eq!(card_ids(&next[1]), vec!["c9"]);
    }
}
