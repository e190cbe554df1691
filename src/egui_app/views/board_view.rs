//! Board page: columns of cards with drag-and-drop, keyboard focus, search
//! and the create/detail windows.
//!
//! Drawing never mutates the stores. Clicks and drops are collected as
//! [`Intent`]s and applied to [`AppState`] once the frame's widgets are laid out.

use chrono::{Local, Utc};
use eframe::egui;

use crate::board_view::{BoardStats, EscapeTarget, Key};
use crate::egui_app::forms::{CardForm, ListForm};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{self, colors};
use crate::shared::config::MAX_CARDS_PER_BOARD;
use crate::shared::models::{BoardList, Card, Label};
use crate::shared::timestamp::{describe_due, DUE_INPUT_FORMAT};

const COLUMN_WIDTH: f32 = 272.0;

const KEY_MAP: [(egui::Key, Key); 10] = [
    (egui::Key::ArrowLeft, Key::Left),
    (egui::Key::ArrowRight, Key::Right),
    (egui::Key::ArrowUp, Key::Up),
    (egui::Key::ArrowDown, Key::Down),
    (egui::Key::Space, Key::Space),
    (egui::Key::Escape, Key::Escape),
    (egui::Key::Slash, Key::Slash),
    (egui::Key::N, Key::N),
    (egui::Key::C, Key::C),
    (egui::Key::X, Key::X),
];

const SHORTCUTS: [(&str, &str); 9] = [
    ("← →", "Move between lists"),
    ("↑ ↓", "Move between cards"),
    ("Space", "Open focused card / toggle checklist item"),
    ("N", "New card in focused list"),
    ("C", "New list"),
    ("/", "Search cards"),
    ("X", "Close card details"),
    ("Esc", "Close the topmost overlay"),
    ("Drag", "Move cards and lists"),
];

enum Intent {
    BeginDrag(String),
    FinishDrag(Option<String>),
    OpenCard(String),
    OpenCreateCard(String),
    RenameList(String),
    DeleteList(String),
}

/// What the columns need from the view, read once per frame
struct ColumnContext {
    focused_card: Option<String>,
    dragging: bool,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let ctx = ui.ctx().clone();
    handle_keys(&ctx, state);

    let list_state = state.lists.snapshot();
    let Some(view) = state.board_view.as_ref() else {
        return;
    };
    let column_ctx = ColumnContext {
        focused_card: view.focus.focused_card(&list_state.lists).map(|card| card.id.clone()),
        dragging: view.drag.is_dragging(),
    };
    let visible = view.filtered_lists(&list_state.lists);

    let mut intents = Vec::new();
    egui::Frame::new().inner_margin(egui::Margin::same(12)).show(ui, |ui| {
        toolbar(ui, state, &list_state.lists);
        if let Some(error) = list_state.status.error().or(list_state.card_status.error()) {
            ui.colored_label(colors::ERROR, error);
        }
        ui.add_space(8.0);

        if list_state.status.is_loading() && list_state.lists.is_empty() {
            ui.spinner();
            return;
        }

        let mut renaming = state.renaming_list.take();
        let mut rename_submitted = false;
        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal_top(|ui| {
                let mut card_over = None;
                let mut column_over = None;
                for list in &visible {
                    let (over_card, dropped) = column(ui, list, &column_ctx, &mut renaming, &mut rename_submitted, &mut intents);
                    card_over = card_over.or(over_card);
                    if dropped {
                        column_over = Some(list.id.clone());
                    }
                }
                let released = ui.input(|i| i.pointer.any_released());
                if column_ctx.dragging && released {
                    intents.push(Intent::FinishDrag(card_over.or(column_over)));
                }
            });
        });
        state.renaming_list = renaming;
        if rename_submitted {
            state.submit_rename_list();
        }
    });

    for intent in intents {
        apply(state, intent);
    }

    create_list_window(&ctx, state);
    create_card_window(&ctx, state);
    card_detail_window(&ctx, state, &list_state.lists);
    shortcuts_window(&ctx, state);
}

fn handle_keys(ctx: &egui::Context, state: &mut AppState) {
    let input_focused = ctx.wants_keyboard_input();
    let keys: Vec<Key> = ctx.input(|i| {
        KEY_MAP
            .iter()
            .filter(|(egui_key, _)| i.key_pressed(*egui_key))
            .map(|(_, key)| *key)
            .collect()
    });
    for key in keys {
        state.handle_key(key, input_focused);
    }
}

fn apply(state: &mut AppState, intent: Intent) {
    match intent {
        Intent::BeginDrag(id) => state.begin_drag(&id),
        Intent::FinishDrag(over) => state.finish_drag(over.as_deref()),
        Intent::OpenCard(card_id) => {
            if let Some(view) = state.board_view.as_mut() {
                view.modals.viewing_card_id = Some(card_id);
            }
            state.card_edit = None;
        }
        Intent::OpenCreateCard(list_id) => {
            state.form_error = None;
            if let Some(view) = state.board_view.as_mut() {
                view.modals.create_card_list = Some(list_id);
            }
        }
        Intent::RenameList(list_id) => state.begin_rename_list(&list_id),
        Intent::DeleteList(list_id) => state.delete_list(&list_id),
    }
}

fn toolbar(ui: &mut egui::Ui, state: &mut AppState, lists: &[BoardList]) {
    let Some(view) = state.board_view.as_mut() else {
        return;
    };
    ui.horizontal(|ui| {
        let search = ui.add(
            egui::TextEdit::singleline(&mut view.search_query)
                .hint_text("Search cards... (/)")
                .desired_width(220.0),
        );
        if view.focus_search_requested {
            search.request_focus();
            view.focus_search_requested = false;
        }
        if view.search_active() {
            let count = crate::board_view::result_count(lists, &view.search_query);
            ui.colored_label(colors::TEXT_SECONDARY, format!("{} result(s)", count));
            if ui.small_button("✕").clicked() {
                view.close(EscapeTarget::Search);
            }
        }

        let stats = BoardStats::of(lists);
        ui.colored_label(
            if stats.at_card_limit() { colors::WARNING } else { colors::TEXT_SECONDARY },
            format!("{} lists · {}/{} cards", stats.lists, stats.cards, MAX_CARDS_PER_BOARD),
        );
        if let Some(card) = view.drag.overlay_card() {
            ui.colored_label(colors::DROP_HIGHLIGHT, format!("Moving \"{}\"", card.title));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("?").on_hover_text("Keyboard shortcuts").clicked() {
                view.modals.shortcuts_help = true;
            }
            if ui.add(egui::Button::new("+ Add List").fill(colors::ACCENT)).clicked() {
                view.modals.create_list = true;
            }
        });
    });
}

/// Draw one column. Returns the card a drag was released over, if any, and
/// whether a drag was released over the column itself.
fn column(
    ui: &mut egui::Ui,
    list: &BoardList,
    column_ctx: &ColumnContext,
    renaming: &mut Option<(String, ListForm)>,
    rename_submitted: &mut bool,
    intents: &mut Vec<Intent>,
) -> (Option<String>, bool) {
    let mut card_over = None;
    let frame = theme::column_frame(column_ctx.dragging);
    let (_, dropped) = ui.dnd_drop_zone::<String, _>(frame, |ui| {
        ui.set_width(COLUMN_WIDTH);
        column_header(ui, list, renaming, rename_submitted, intents);
        ui.add_space(6.0);

        for card in &list.cards {
            let focused = column_ctx.focused_card.as_deref() == Some(card.id.as_str());
            let id = egui::Id::new(("card", &card.id));
            let egui::InnerResponse { inner: tile, response } =
                ui.dnd_drag_source(id, card.id.clone(), |ui| card_tile(ui, card, focused));
            if response.drag_started() {
                intents.push(Intent::BeginDrag(card.id.clone()));
            }
            if tile.clicked() {
                intents.push(Intent::OpenCard(card.id.clone()));
            }
            if response.dnd_release_payload::<String>().is_some() {
                card_over = Some(card.id.clone());
            }
            ui.add_space(4.0);
        }

        if ui.button("+ Add a card").clicked() {
            intents.push(Intent::OpenCreateCard(list.id.clone()));
        }
    });
    (card_over, dropped.is_some())
}

fn column_header(
    ui: &mut egui::Ui,
    list: &BoardList,
    renaming: &mut Option<(String, ListForm)>,
    rename_submitted: &mut bool,
    intents: &mut Vec<Intent>,
) {
    ui.horizontal(|ui| {
        let handle = ui.dnd_drag_source(egui::Id::new(("list", &list.id)), list.id.clone(), |ui| {
            ui.colored_label(colors::TEXT_SECONDARY, "⠿");
        });
        if handle.response.drag_started() {
            intents.push(Intent::BeginDrag(list.id.clone()));
        }

        match renaming {
            Some((list_id, form)) if *list_id == list.id => {
                let edit = ui.add(egui::TextEdit::singleline(&mut form.title).desired_width(150.0));
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    *rename_submitted = true;
                }
                if ui.small_button("✔").clicked() {
                    *rename_submitted = true;
                }
                if ui.small_button("✕").clicked() {
                    *renaming = None;
                }
            }
            _ => {
                ui.label(egui::RichText::new(&list.title).strong().color(colors::TEXT_DARK));
                ui.colored_label(colors::TEXT_SECONDARY, list.cards.len().to_string());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("🗑").on_hover_text("Delete list").clicked() {
                        intents.push(Intent::DeleteList(list.id.clone()));
                    }
                    if ui.small_button("✏").on_hover_text("Rename list").clicked() {
                        intents.push(Intent::RenameList(list.id.clone()));
                    }
                });
            }
        }
    });
}

fn label_chip(ui: &mut egui::Ui, label: Label) {
    egui::Frame::new()
        .fill(colors::label_color(label))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(label.display_name()).small().color(colors::TEXT_LIGHT));
        });
}

/// Draw a card; the returned response reports clicks on it
fn card_tile(ui: &mut egui::Ui, card: &Card, focused: bool) -> egui::Response {
    let frame = theme::card_frame(focused).show(ui, |ui| {
        ui.set_width(COLUMN_WIDTH - 16.0);
        if !card.labels.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for label in &card.labels {
                    label_chip(ui, *label);
                }
            });
        }
        ui.label(egui::RichText::new(&card.title).color(colors::TEXT_DARK));

        let (done, total) = card.checklist_progress();
        let due = card.due_date.map(|due| describe_due(&due, &Utc::now(), &Local));
        if total > 0 || due.is_some() {
            ui.horizontal(|ui| {
                if let Some(due) = due {
                    ui.colored_label(colors::due_color(due.status), format!("🕑 {}", due.text));
                }
                if total > 0 {
                    let color = if done == total { colors::SUCCESS } else { colors::TEXT_SECONDARY };
                    ui.colored_label(color, format!("☑ {}/{}", done, total));
                }
            });
        }
    });
    frame.response.interact(egui::Sense::click())
}

fn label_picker(ui: &mut egui::Ui, form: &mut CardForm) {
    ui.horizontal_wrapped(|ui| {
        for label in Label::ALL {
            let selected = form.labels.contains(&label);
            let text = egui::RichText::new(label.display_name()).color(if selected {
                colors::TEXT_LIGHT
            } else {
                colors::TEXT_DARK
            });
            let fill = if selected { colors::label_color(label) } else { colors::COLUMN_BG };
            if ui.add(egui::Button::new(text).fill(fill)).clicked() {
                form.toggle_label(label);
            }
        }
    });
}

/// Shared body of the create and edit card forms. Returns any local error
/// raised while adding a checklist item.
fn card_form_fields(ui: &mut egui::Ui, form: &mut CardForm) -> Option<String> {
    ui.label("Title");
    ui.text_edit_singleline(&mut form.title);
    ui.label("Description");
    ui.text_edit_multiline(&mut form.description);
    ui.label("Labels");
    label_picker(ui, form);
    ui.label(format!("Due date ({})", DUE_INPUT_FORMAT));
    ui.add(egui::TextEdit::singleline(&mut form.due_input).hint_text("16/12/2025 14:30"));

    ui.label("Checklist");
    let mut remove = None;
    for item in &form.checklist {
        ui.horizontal(|ui| {
            ui.label(format!("• {}", item.text));
            if ui.small_button("✕").clicked() {
                remove = Some(item.id.clone());
            }
        });
    }
    if let Some(item_id) = remove {
        form.remove_checklist_item(&item_id);
    }
    let mut error = None;
    ui.horizontal(|ui| {
        let input = ui.add(egui::TextEdit::singleline(&mut form.checklist_input).hint_text("New item"));
        let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.small_button("Add").clicked() || entered {
            error = form.add_checklist_item().err().map(|err| err.user_message().to_string());
        }
    });
    error
}

fn create_list_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(open_before) = state.board_view.as_ref().map(|view| view.modals.create_list) else {
        return;
    };
    if !open_before {
        return;
    }
    let mut open = true;
    let mut submit = false;
    egui::Window::new("Create List")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if let Some(error) = &state.form_error {
                ui.colored_label(colors::ERROR, error);
            }
            ui.label("Title");
            let input = ui.text_edit_singleline(&mut state.list_form.title);
            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Create").clicked() || entered {
                submit = true;
            }
        });
    if submit {
        state.submit_create_list();
    }
    if !open {
        state.form_error = None;
        if let Some(view) = state.board_view.as_mut() {
            view.close(EscapeTarget::CreateModals);
        }
    }
}

fn create_card_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(list_id) = state
        .board_view
        .as_ref()
        .and_then(|view| view.modals.create_card_list.clone())
    else {
        return;
    };
    let list_title = state
        .lists
        .snapshot()
        .list(&list_id)
        .map(|list| list.title.clone())
        .unwrap_or_default();

    let mut open = true;
    let mut submit = false;
    egui::Window::new(format!("New card in {}", list_title))
        .id(egui::Id::new("create_card"))
        .open(&mut open)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if let Some(error) = &state.form_error {
                ui.colored_label(colors::ERROR, error);
            }
            if let Some(error) = card_form_fields(ui, &mut state.card_form) {
                state.form_error = Some(error);
            }
            ui.add_space(8.0);
            if ui.add(egui::Button::new("Create").fill(colors::ACCENT)).clicked() {
                submit = true;
            }
        });
    if submit {
        state.submit_create_card();
    }
    if !open {
        state.form_error = None;
        if let Some(view) = state.board_view.as_mut() {
            view.close(EscapeTarget::CreateModals);
        }
    }
}

fn card_detail_window(ctx: &egui::Context, state: &mut AppState, lists: &[BoardList]) {
    let Some(view) = state.board_view.as_ref() else {
        return;
    };
    let Some(card) = view.viewing_card(lists).cloned() else {
        return;
    };
    let checklist_focus = view.focus.checklist_index;

    let mut open = true;
    let mut toggle = None;
    let mut action = None;
    egui::Window::new(card.title.clone())
        .id(egui::Id::new("card_detail"))
        .open(&mut open)
        .collapsible(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            if let Some(form) = state.card_edit.as_mut() {
                if let Some(error) = &state.form_error {
                    ui.colored_label(colors::ERROR, error);
                }
                if let Some(error) = card_form_fields(ui, form) {
                    state.form_error = Some(error);
                }
                ui.horizontal(|ui| {
                    if ui.add(egui::Button::new("Save").fill(colors::ACCENT)).clicked() {
                        action = Some(DetailAction::Save);
                    }
                    if ui.button("Cancel").clicked() {
                        action = Some(DetailAction::CancelEdit);
                    }
                });
                return;
            }

            if !card.labels.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for label in &card.labels {
                        label_chip(ui, *label);
                    }
                });
            }
            match &card.description {
                Some(description) => ui.label(description),
                None => ui.colored_label(colors::TEXT_SECONDARY, "No description"),
            };
            if let Some(due) = card.due_date {
                let due = describe_due(&due, &Utc::now(), &Local);
                ui.colored_label(colors::due_color(due.status), format!("Due: {}", due.text));
            }

            if !card.checklist.is_empty() {
                let (done, total) = card.checklist_progress();
                ui.separator();
                ui.label(format!("Checklist {}/{}", done, total));
                for (index, item) in card.checklist.iter().enumerate() {
                    let mut checked = item.completed;
                    let text = egui::RichText::new(&item.text);
                    let text = if checklist_focus == Some(index) {
                        text.strong().color(colors::FOCUS_RING)
                    } else {
                        text
                    };
                    if ui.checkbox(&mut checked, text).changed() {
                        toggle = Some(item.id.clone());
                    }
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Edit").clicked() {
                    action = Some(DetailAction::Edit);
                }
                if ui.button("Delete").clicked() {
                    action = Some(DetailAction::Delete);
                }
            });
        });

    if let Some(item_id) = toggle {
        state.toggle_checklist_item(&card.id, &item_id);
    }
    match action {
        Some(DetailAction::Edit) => state.begin_edit_card(&card.id),
        Some(DetailAction::Save) => state.submit_card_edit(&card.id),
        Some(DetailAction::CancelEdit) => {
            state.card_edit = None;
            state.form_error = None;
        }
        Some(DetailAction::Delete) => state.delete_card(&card.id),
        None => {}
    }
    if !open {
        state.card_edit = None;
        if let Some(view) = state.board_view.as_mut() {
            view.close(EscapeTarget::Detail);
        }
    }
}

enum DetailAction {
    Edit,
    Save,
    CancelEdit,
    Delete,
}

fn shortcuts_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(view) = state.board_view.as_mut() else {
        return;
    };
    if !view.modals.shortcuts_help {
        return;
    }
    let mut open = true;
    egui::Window::new("Keyboard Shortcuts")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts").striped(true).show(ui, |ui| {
                for (keys, description) in SHORTCUTS {
                    ui.label(egui::RichText::new(keys).monospace().strong());
                    ui.label(description);
                    ui.end_row();
                }
            });
        });
    if !open {
        view.close(EscapeTarget::ShortcutsHelp);
    }
}
