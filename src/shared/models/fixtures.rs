//! Minimal model values for unit tests

use chrono::{DateTime, Utc};

use super::{BoardList, Card};

pub fn card(id: &str, list_id: &str, order: i64) -> Card {
    Card {
        id: id.to_string(),
        title: format!("Card {}", id),
        description: None,
        labels: Vec::new(),
        due_date: None,
        checklist: Vec::new(),
        order,
        list_id: list_id.to_string(),
        created_at: DateTime::<Utc>::default(),
        updated_at: DateTime::<Utc>::default(),
    }
}

/// List whose cards are numbered densely in the given order
pub fn list(id: &str, order: i64, card_ids: &[&str]) -> BoardList {
    BoardList {
        id: id.to_string(),
        title: format!("List {}", id),
        order,
        board_id: "b1".to_string(),
        created_at: DateTime::<Utc>::default(),
        updated_at: DateTime::<Utc>::default(),
        cards: card_ids
            .iter()
            .enumerate()
            .map(|(index, card_id)| card(card_id, id, index as i64))
            .collect(),
    }
}

pub fn card_ids(list: &BoardList) -> Vec<&str> {
    list.cards.iter().map(|card| card.id.as_str()).collect()
}
