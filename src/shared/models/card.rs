use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::order::OrderMap;
use crate::shared::timestamp;

/// Card label colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Red,
    Yellow,
    Green,
    Blue,
    Purple,
    Orange,
}

impl Label {
    pub const ALL: [Label; 6] = [
        Label::Red,
        Label::Yellow,
        Label::Green,
        Label::Blue,
        Label::Purple,
        Label::Orange,
    ];

    /// Name shown on the label chip
    pub fn display_name(self) -> &'static str {
        match self {
            Label::Red => "Urgent",
            Label::Yellow => "Warning",
            Label::Green => "Complete",
            Label::Blue => "Info",
            Label::Purple => "Feature",
            Label::Orange => "Bug",
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Label::Red => (0xef, 0x44, 0x44),
            Label::Yellow => (0xfa, 0xcc, 0x15),
            Label::Green => (0x22, 0xc5, 0x5e),
            Label::Blue => (0x3b, 0x82, 0xf6),
            Label::Purple => (0xa8, 0x55, 0xf7),
            Label::Orange => (0xf9, 0x73, 0x16),
        }
    }
}

/// One checklist entry. The id is generated here and never reissued by the
/// server; it is only unique within its card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Task unit inside a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default, with = "timestamp::lenient_option")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub order: i64,
    pub list_id: String,
    #[serde(with = "timestamp::lenient")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::lenient")]
    pub updated_at: DateTime<Utc>,
}

impl Card {
    /// `(completed, total)` checklist items
    pub fn checklist_progress(&self) -> (usize, usize) {
        let done = self.checklist.iter().filter(|item| item.completed).count();
        (done, self.checklist.len())
    }

    /// Checklist with one item's completion flipped
    pub fn checklist_with_toggled(&self, item_id: &str) -> Vec<ChecklistItem> {
        self.checklist
            .iter()
            .map(|item| {
                let mut item = item.clone();
                if item.id == item_id {
                    item.completed = !item.completed;
                }
                item
            })
            .collect()
    }
}

/// Body of `POST /api/cards/{listId}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<Label>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::lenient_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Body of `PUT /api/cards/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::lenient_option"
    )]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checklist: Option<Vec<ChecklistItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl CardUpdate {
    /// Update carrying only a replacement checklist
    pub fn checklist(checklist: Vec<ChecklistItem>) -> Self {
        Self {
            checklist: Some(checklist),
            ..Self::default()
        }
    }
}

/// Body of `POST /api/cards/{id}/move`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMove {
    pub target_list_id: String,
    pub new_order: i64,
}

/// Body of `POST /api/cards/{listId}/reorder`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardReorder {
    pub card_orders: OrderMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_json() -> serde_json::Value {
        serde_json::json!({
            "id": "c1",
            "title": "Write docs",
            "description": null,
            "labels": ["red", "blue"],
            "due_date": "2024-12-31T23:59:59",
            "checklist": [
                {"id": "i1", "text": "outline", "completed": true},
                {"id": "i2", "text": "draft", "completed": false}
            ],
            "order": 0,
            "list_id": "l1",
            "created_at": "2024-12-13T00:00:00",
            "updated_at": "2024-12-13T00:00:00"
        })
    }

    #[test]
    fn test_card_parses_labels_and_naive_due_date() {
        let card: Card = serde_json::from_value(card_json()).unwrap();
        assert_eq!(card.labels, vec![Label::Red, Label::Blue]);
        assert_eq!(
            card.due_date.map(|d| timestamp::to_wire(&d)),
            Some("2024-12-31T23:59:59Z".to_string())
        );
        assert_eq!(card.checklist_progress(), (1, 2));
    }

    #[test]
    fn test_toggle_flips_only_target_item() {
        let card: Card = serde_json::from_value(card_json()).unwrap();
        let toggled = card.checklist_with_toggled("i2");
        assert!(toggled[0].completed);
        assert!(toggled[1].completed);
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = CardUpdate::checklist(vec![]);
        assert_eq!(serde_json::to_value(&update).unwrap(), serde_json::json!({"checklist": []}));
    }

    #[test]
    fn test_checklist_item_ids_are_fresh() {
        let a = ChecklistItem::new("one");
        let b = ChecklistItem::new("one");
        assert_ne!(a.id, b.id);
        assert!(!a.completed);
    }

    #[test]
    fn test_label_display_names() {
        assert_eq!(Label::Orange.display_name(), "Bug");
        assert_eq!(serde_json::to_value(Label::Purple).unwrap(), serde_json::json!("purple"));
    }
}
