use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::timestamp;

/// Background colour used when the user does not pick one
pub const DEFAULT_BOARD_COLOR: &str = "#3b82f6";

/// Named background colour offered by the create-board form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub value: &'static str,
}

pub const BOARD_COLOR_PRESETS: [ColorPreset; 8] = [
    ColorPreset { name: "Blue", value: DEFAULT_BOARD_COLOR },
    ColorPreset { name: "Red", value: "#ef4444" },
    ColorPreset { name: "Green", value: "#10b981" },
    ColorPreset { name: "Purple", value: "#8b5cf6" },
    ColorPreset { name: "Orange", value: "#f59e0b" },
    ColorPreset { name: "Pink", value: "#ec4899" },
    ColorPreset { name: "Teal", value: "#14b8a6" },
    ColorPreset { name: "Indigo", value: "#6366f1" },
];

/// Top-level container owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub background_color: String,
    pub owner_id: String,
    #[serde(with = "timestamp::lenient")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp::lenient")]
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Parse `#rrggbb` into components; `None` for anything else
    pub fn background_rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.background_color.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Body of `POST /api/boards`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Body of `PUT /api/boards/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

/// Body of `GET /api/boards`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardListResponse {
    pub boards: Vec<Board>,
    #[serde(default)]
    pub total: usize,
}
