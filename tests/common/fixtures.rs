//! Response bodies as the board service sends them

use serde_json::{json, Value};

pub const CREATED_AT: &str = "2025-01-01T10:00:00";

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "email": "ada@example.com",
        "username": "ada",
        "full_name": "Ada Lovelace",
        "is_active": true,
        "created_at": CREATED_AT
    })
}

pub fn token_json(access_token: &str, refresh_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "token_type": "bearer",
        "user": user_json()
    })
}

pub fn board_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "background_color": "#3b82f6",
        "owner_id": "u1",
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT
    })
}

pub fn boards_json(boards: &[Value]) -> Value {
    json!({ "boards": boards, "total": boards.len() })
}

pub fn card_json(id: &str, list_id: &str, order: i64) -> Value {
    json!({
        "id": id,
        "title": format!("Card {}", id),
        "description": null,
        "labels": [],
        "due_date": null,
        "checklist": [],
        "order": order,
        "list_id": list_id,
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT
    })
}

/// A list whose cards get dense orders in the given sequence
pub fn list_json(id: &str, order: i64, card_ids: &[&str]) -> Value {
    let cards: Vec<Value> = card_ids
        .iter()
        .enumerate()
        .map(|(index, card_id)| card_json(card_id, id, index as i64))
        .collect();
    json!({
        "id": id,
        "title": format!("List {}", id),
        "order": order,
        "board_id": "b1",
        "created_at": CREATED_AT,
        "updated_at": CREATED_AT,
        "cards": cards
    })
}

/// Card ids of one list in the store's current order
pub fn card_ids(lists: &[taskboard::shared::BoardList], list_id: &str) -> Vec<String> {
    lists
        .iter()
        .find(|list| list.id == list_id)
        .map(|list| list.cards.iter().map(|card| card.id.clone()).collect())
        .unwrap_or_default()
}

pub fn list_ids(lists: &[taskboard::shared::BoardList]) -> Vec<String> {
    lists.iter().map(|list| list.id.clone()).collect()
}
