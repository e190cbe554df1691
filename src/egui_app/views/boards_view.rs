use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;
use crate::shared::config::MAX_BOARDS_PER_USER;
use crate::shared::models::{Board, BOARD_COLOR_PRESETS};

const TILE_SIZE: egui::Vec2 = egui::vec2(220.0, 110.0);

enum TileAction {
    Open,
    Delete,
}

fn board_tile(ui: &mut egui::Ui, board: &Board) -> Option<TileAction> {
    let mut action = None;
    egui::Frame::new()
        .fill(colors::board_color(board))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_size(TILE_SIZE);
            ui.set_max_width(TILE_SIZE.x);
            ui.vertical(|ui| {
                let title = ui.add(
                    egui::Label::new(egui::RichText::new(&board.title).size(16.0).strong().color(colors::TEXT_LIGHT))
                        .sense(egui::Sense::click()),
                );
                if title.clicked() {
                    action = Some(TileAction::Open);
                }
                if let Some(description) = &board.description {
                    ui.colored_label(colors::TEXT_LIGHT, description);
                }
                ui.with_layout(egui::Layout::bottom_up(egui::Align::Max), |ui| {
                    ui.horizontal(|ui| {
                        if ui.small_button("Open").clicked() {
                            action = Some(TileAction::Open);
                        }
                        if ui.small_button("Delete").clicked() {
                            action = Some(TileAction::Delete);
                        }
                    });
                });
            });
        });
    action
}

fn create_board_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_create_board;
    let mut submit = false;
    egui::Window::new("Create Board")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if let Some(error) = &state.form_error {
                ui.colored_label(colors::ERROR, error);
            }
            let form = &mut state.board_form;
            ui.label("Title");
            ui.text_edit_singleline(&mut form.title);
            ui.label("Description");
            ui.text_edit_multiline(&mut form.description);
            ui.label("Background");
            ui.horizontal_wrapped(|ui| {
                for preset in BOARD_COLOR_PRESETS.iter() {
                    let selected = form.background_color == preset.value;
                    let swatch = egui::Button::new("")
                        .fill(colors::hex_color(preset.value))
                        .min_size(egui::vec2(28.0, 28.0))
                        .stroke(if selected {
                            egui::Stroke::new(2.0, colors::TEXT_DARK)
                        } else {
                            egui::Stroke::NONE
                        });
                    if ui.add(swatch).on_hover_text(preset.name).clicked() {
                        form.background_color = preset.value.to_string();
                    }
                }
            });
            ui.add_space(8.0);
            let loading = state.boards.snapshot().status.is_loading();
            if ui.add_enabled(!loading, egui::Button::new("Create")).clicked() {
                submit = true;
            }
        });
    if submit {
        state.submit_create_board();
    }
    if !open {
        state.show_create_board = false;
        state.form_error = None;
    }
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let snapshot = state.boards.snapshot();
    let can_create = snapshot.can_create_board();

    egui::Frame::new().inner_margin(egui::Margin::same(16)).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.heading(egui::RichText::new("Your Boards").color(colors::TEXT_LIGHT));
            ui.colored_label(
                if can_create { colors::TEXT_SECONDARY } else { colors::WARNING },
                format!("{}/{}", snapshot.boards.len(), MAX_BOARDS_PER_USER),
            );
            if snapshot.status.is_loading() {
                ui.spinner();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let create = ui
                    .add_enabled(can_create, egui::Button::new("+ New Board").fill(colors::ACCENT))
                    .on_disabled_hover_text("Board limit reached");
                if create.clicked() {
                    state.form_error = None;
                    state.show_create_board = true;
                }
                if ui.button("Refresh").clicked() {
                    state.refresh_boards();
                }
            });
        });
        ui.add_space(12.0);

        if let Some(error) = snapshot.status.error() {
            ui.colored_label(colors::ERROR, error);
            ui.add_space(8.0);
        }

        if snapshot.boards.is_empty() && !snapshot.status.is_loading() {
            ui.colored_label(colors::TEXT_SECONDARY, "No boards yet. Create one to get started.");
        }

        let mut open = None;
        let mut delete = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                for board in &snapshot.boards {
                    match board_tile(ui, board) {
                        Some(TileAction::Open) => open = Some(board.id.clone()),
                        Some(TileAction::Delete) => delete = Some(board.id.clone()),
                        None => {}
                    }
                }
            });
        });
        if let Some(board_id) = open {
            state.open_board(&board_id);
        }
        if let Some(board_id) = delete {
            state.delete_board(&board_id);
        }
    });

    if state.show_create_board {
        create_board_window(ui.ctx(), state);
    }
}
