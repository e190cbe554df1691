use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::order::OrderMap;
use crate::shared::timestamp;

/// Ordered column within a board.
///
/// `cards` is only filled by a fetch of the whole board; a list coming back
/// from create or update carries none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: String,
    pub title: String,
    pub order: i64,
    pub board_id: String,
    #[serde(with = "timestamp::lenient")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::lenient")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl BoardList {
    pub fn card_index(&self, card_id: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.id == card_id)
    }

    pub fn contains_card(&self, card_id: &str) -> bool {
        self.card_index(card_id).is_some()
    }
}

/// Body of `POST /api/lists/{boardId}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Body of `PUT /api/lists/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Body of `POST /api/lists/{boardId}/reorder`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReorder {
    pub list_orders: OrderMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_cards_default_to_empty() {
        let list: BoardList = serde_json::from_value(serde_json::json!({
            "id": "l1",
            "title": "To Do",
            "order": 0,
            "board_id": "b1",
            "created_at": "2024-12-13T00:00:00",
            "updated_at": "2024-12-13T00:00:00"
        }))
        .unwrap();
        assert!(list.cards.is_empty());
    }

    #[test]
    fn test_reorder_body_shape() {
        let body = ListReorder { list_orders: OrderMap::dense(["l2", "l1"]) };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"list_orders": {"l2": 0, "l1": 1}})
        );
    }
}
