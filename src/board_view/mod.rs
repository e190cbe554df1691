//! Board View
//!
//! Everything the board page does that is not drawing: the drag-and-drop
//! gesture and the requests it turns into, keyboard focus, search, modal
//! flags and transient notifications. None of it touches egui, so the
//! desktop view stays a thin renderer over [`BoardView`].

pub mod drag;
pub mod keyboard;
pub mod notify;
pub mod search;

pub use drag::{begin_drag, execute_plan, plan_drop, DragState, DragSubject, DropPlan};
pub use keyboard::{EscapeTarget, Key, KeyAction, KeyContext, KeyboardFocus};
pub use notify::{Notification, NotificationKind, Notifications};
pub use search::{filter_lists, result_count, BoardStats};

use crate::shared::models::{BoardList, Card, CardUpdate};

/// Which overlays are open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modals {
    pub create_list: bool,
    /// List the create-card form adds to
    pub create_card_list: Option<String>,
    /// Card shown in the detail view
    pub viewing_card_id: Option<String>,
    pub shortcuts_help: bool,
}

impl Modals {
    pub fn create_open(&self) -> bool {
        self.create_list || self.create_card_list.is_some()
    }
}

/// View-level state of one open board
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub board_id: String,
    pub drag: DragState,
    pub focus: KeyboardFocus,
    pub modals: Modals,
    pub search_query: String,
    /// Set when the search box should take keyboard focus next frame
    pub focus_search_requested: bool,
    pub notifications: Notifications,
}

impl BoardView {
    pub fn new(board_id: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            ..Self::default()
        }
    }

    /// Detail-view card, read fresh from the store's lists
    pub fn viewing_card<'a>(&self, lists: &'a [BoardList]) -> Option<&'a Card> {
        let card_id = self.modals.viewing_card_id.as_deref()?;
        lists
            .iter()
            .flat_map(|list| list.cards.iter())
            .find(|card| card.id == card_id)
    }

    pub fn filtered_lists(&self, lists: &[BoardList]) -> Vec<BoardList> {
        filter_lists(lists, &self.search_query)
    }

    pub fn search_active(&self) -> bool {
        !self.search_query.trim().is_empty()
    }

    pub fn begin_drag(&mut self, id: &str, lists: &[BoardList]) {
        self.drag = begin_drag(id, lists);
    }

    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// End the active drag over `over` and plan the resulting request
    pub fn finish_drag(&mut self, over: Option<&str>, lists: &[BoardList]) -> DropPlan {
        let drag = std::mem::take(&mut self.drag);
        match drag.active_id() {
            Some(active_id) => plan_drop(active_id, over, lists),
            None => DropPlan::Noop,
        }
    }

    /// Route a key press through the focus model and apply the effects that
    /// are local to the view. Returns the action so the caller can issue any
    /// request it implies.
    pub fn handle_key(&mut self, key: Key, lists: &[BoardList], input_focused: bool) -> KeyAction {
        let viewing_card = self.viewing_card(lists);
        // a detail view whose card vanished is treated as closed
        if viewing_card.is_none() {
            self.modals.viewing_card_id = None;
        }
        let ctx = KeyContext {
            lists,
            viewing_card,
            create_modal_open: self.modals.create_open(),
            shortcuts_help_open: self.modals.shortcuts_help,
            search_active: self.search_active(),
            input_focused,
        };
        let action = self.focus.handle_key(key, &ctx);
        self.apply(&action);
        action
    }

    fn apply(&mut self, action: &KeyAction) {
        match action {
            KeyAction::OpenCard { card_id } => self.modals.viewing_card_id = Some(card_id.clone()),
            KeyAction::OpenCreateCard { list_id } => self.modals.create_card_list = Some(list_id.clone()),
            KeyAction::OpenCreateList => self.modals.create_list = true,
            KeyAction::FocusSearch => self.focus_search_requested = true,
            KeyAction::Close(target) => self.close(*target),
            KeyAction::Notify(text) => self.notifications.error(text.clone()),
            KeyAction::None | KeyAction::FocusMoved | KeyAction::ToggleChecklistItem { .. } => {}
        }
    }

    pub fn close(&mut self, target: EscapeTarget) {
        match target {
            EscapeTarget::Detail => {
                self.modals.viewing_card_id = None;
                self.focus.checklist_index = None;
            }
            EscapeTarget::CreateModals => {
                self.modals.create_list = false;
                self.modals.create_card_list = None;
            }
            EscapeTarget::ShortcutsHelp => self.modals.shortcuts_help = false,
            EscapeTarget::Search => self.search_query.clear(),
            EscapeTarget::Focus => self.focus.clear(),
        }
    }
}

/// Update that flips one checklist item, carrying the whole checklist
pub fn toggle_checklist_item(card: &Card, item_id: &str) -> CardUpdate {
    CardUpdate::checklist(card.checklist_with_toggled(item_id))
}
