//! Theme Styling Functions

use eframe::egui::{self, CornerRadius, Stroke};

use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.window_fill = colors::COLUMN_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::CARD_BORDER);
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.override_text_color = None;

    style.visuals.widgets.inactive.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.hovered.corner_radius = CornerRadius::same(6);
    style.visuals.widgets.active.corner_radius = CornerRadius::same(6);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Column frame; a highlighted column is a live drop target
pub fn column_frame(highlighted: bool) -> egui::Frame {
    let stroke = if highlighted {
        Stroke::new(2.0, colors::DROP_HIGHLIGHT)
    } else {
        Stroke::NONE
    };
    egui::Frame::new()
        .fill(colors::COLUMN_BG)
        .stroke(stroke)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(8))
}

/// Card frame; focused cards get the keyboard focus ring
pub fn card_frame(focused: bool) -> egui::Frame {
    let stroke = if focused {
        Stroke::new(2.0, colors::FOCUS_RING)
    } else {
        Stroke::new(1.0, colors::CARD_BORDER)
    };
    egui::Frame::new()
        .fill(colors::CARD_BG)
        .stroke(stroke)
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(8, 6))
}
