//! Color Constants
//!
//! Slate background, white columns and cards, with accents taken from the
//! board's own background colour where one is set.

use eframe::egui::Color32;

use crate::shared::models::{Board, Label};
use crate::shared::timestamp::DueStatus;

/// App background - Slate
pub const BG_DARK: Color32 = Color32::from_rgb(0x1E, 0x29, 0x3B);

/// Top bar background - Deep slate
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x0F, 0x17, 0x2A);

/// List column background - Light gray
pub const COLUMN_BG: Color32 = Color32::from_rgb(0xF1, 0xF5, 0xF9);

/// Card background - White
pub const CARD_BG: Color32 = Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xCB, 0xD5, 0xE1);

/// Keyboard focus ring - Amber
pub const FOCUS_RING: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);

/// Drop target highlight
pub const DROP_HIGHLIGHT: Color32 = Color32::from_rgb(0x93, 0xC5, 0xFD);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF8, 0xFA, 0xFC);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x0F, 0x17, 0x2A);

/// Secondary text
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x64, 0x74, 0x8B);

/// Primary buttons
pub const ACCENT: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xF9, 0x73, 0x16);

pub fn label_color(label: Label) -> Color32 {
    let (r, g, b) = label.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn board_color(board: &Board) -> Color32 {
    board
        .background_rgb()
        .map(|(r, g, b)| Color32::from_rgb(r, g, b))
        .unwrap_or(ACCENT)
}

/// Hex `#rrggbb` preset to colour; malformed values fall back to the accent
pub fn hex_color(hex: &str) -> Color32 {
    let parse = |range: std::ops::Range<usize>| {
        hex.strip_prefix('#')
            .and_then(|digits| digits.get(range))
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
    };
    match (parse(0..2), parse(2..4), parse(4..6)) {
        (Some(r), Some(g), Some(b)) => Color32::from_rgb(r, g, b),
        _ => ACCENT,
    }
}

pub fn due_color(status: DueStatus) -> Color32 {
    match status {
        DueStatus::Overdue | DueStatus::Today => ERROR,
        DueStatus::Tomorrow => WARNING,
        DueStatus::Upcoming => TEXT_SECONDARY,
    }
}
