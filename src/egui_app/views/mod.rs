use eframe::egui;

use crate::board_view::NotificationKind;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, colors};
use crate::egui_app::AppView;

pub mod auth_view;
pub mod board_view;
pub mod boards_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(theme::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Taskboard").size(18.0).strong());

                if let AppView::Board(_) = state.current_view {
                    ui.add_space(12.0);
                    if ui.button("← Boards").clicked() {
                        state.leave_board();
                    }
                    if let Some(board) = state.boards.snapshot().current_board {
                        ui.colored_label(colors::board_color(&board), egui::RichText::new(board.title).strong());
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let session = state.session.snapshot();
                    if session.is_authenticated {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        if let Some(user) = session.user {
                            ui.colored_label(colors::TEXT_LIGHT, format!("@{}", user.username));
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(0));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_view.clone() {
            AppView::Auth => auth_view::render(ui, state),
            AppView::Boards => boards_view::render(ui, state),
            AppView::Board(_) => board_view::render(ui, state),
        });
}

/// Toasts stacked in the bottom-right corner
pub fn render_notifications(ctx: &egui::Context, state: &AppState) {
    if state.notifications.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for notification in state.notifications.iter() {
                let fill = match notification.kind {
                    NotificationKind::Success => colors::SUCCESS,
                    NotificationKind::Error => colors::ERROR,
                };
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.colored_label(colors::TEXT_LIGHT, &notification.text);
                    });
                ui.add_space(6.0);
            }
        });
}
