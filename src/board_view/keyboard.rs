//! Keyboard focus navigation
//!
//! Focus is a pair of indices into the unfiltered lists and their cards,
//! plus a checklist index used while a card's detail view is open. Every
//! movement wraps around at both ends.

use crate::shared::models::{BoardList, Card};

/// Keys the board view reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Escape,
    /// `/`
    Slash,
    N,
    C,
    X,
}

/// What a single Escape press closes, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeTarget {
    Detail,
    CreateModals,
    ShortcutsHelp,
    Search,
    Focus,
}

/// Effect of a key press for the view to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    FocusMoved,
    OpenCard { card_id: String },
    OpenCreateCard { list_id: String },
    OpenCreateList,
    FocusSearch,
    ToggleChecklistItem { card_id: String, item_id: String },
    Close(EscapeTarget),
    Notify(String),
}

/// View state the key handler reads
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    pub lists: &'a [BoardList],
    /// Card whose detail view is open
    pub viewing_card: Option<&'a Card>,
    pub create_modal_open: bool,
    pub shortcuts_help_open: bool,
    pub search_active: bool,
    /// A text field has keyboard focus
    pub input_focused: bool,
}

fn wrap_next(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(index) if index + 1 < len => index + 1,
        _ => 0,
    }
}

fn wrap_prev(current: Option<usize>, len: usize) -> usize {
    match current {
        Some(index) if index > 0 && index < len => index - 1,
        _ => len.saturating_sub(1),
    }
}

/// `None` is "unfocused"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardFocus {
    pub list_index: Option<usize>,
    pub card_index: Option<usize>,
    pub checklist_index: Option<usize>,
}

impl KeyboardFocus {
    pub fn is_focused(&self) -> bool {
        self.list_index.is_some() || self.card_index.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn focused_list<'a>(&self, lists: &'a [BoardList]) -> Option<&'a BoardList> {
        lists.get(self.list_index?)
    }

    pub fn focused_card<'a>(&self, lists: &'a [BoardList]) -> Option<&'a Card> {
        self.focused_list(lists)?.cards.get(self.card_index?)
    }

    pub fn handle_key(&mut self, key: Key, ctx: &KeyContext<'_>) -> KeyAction {
        if key == Key::Escape {
            return self.escape(ctx);
        }
        if ctx.input_focused {
            return KeyAction::None;
        }
        if let Some(card) = ctx.viewing_card {
            return self.detail_key(key, card);
        }
        if ctx.create_modal_open {
            return KeyAction::None;
        }

        match key {
            Key::Left | Key::Right => {
                let len = ctx.lists.len();
                if len == 0 {
                    return KeyAction::None;
                }
                let next = if key == Key::Right {
                    wrap_next(self.list_index, len)
                } else {
                    wrap_prev(self.list_index, len)
                };
                self.list_index = Some(next);
                self.card_index = Some(0);
                KeyAction::FocusMoved
            }
            Key::Up | Key::Down => match self.focused_list(ctx.lists) {
                Some(list) => {
                    let len = list.cards.len();
                    if len == 0 {
                        return KeyAction::None;
                    }
                    self.card_index = Some(if key == Key::Down {
                        wrap_next(self.card_index, len)
                    } else {
                        wrap_prev(self.card_index, len)
                    });
                    KeyAction::FocusMoved
                }
                None if !ctx.lists.is_empty() => {
                    self.list_index = Some(0);
                    self.card_index = Some(0);
                    KeyAction::FocusMoved
                }
                None => KeyAction::None,
            },
            Key::Space => match self.focused_card(ctx.lists) {
                Some(card) => {
                    self.checklist_index = None;
                    KeyAction::OpenCard {
                        card_id: card.id.clone(),
                    }
                }
                None => KeyAction::None,
            },
            Key::Slash => KeyAction::FocusSearch,
            Key::N => {
                let target = self
                    .focused_list(ctx.lists)
                    .or_else(|| ctx.lists.first());
                match target {
                    Some(list) => KeyAction::OpenCreateCard {
                        list_id: list.id.clone(),
                    },
                    None => KeyAction::Notify("Create a list first before adding cards".to_string()),
                }
            }
            Key::C => KeyAction::OpenCreateList,
            Key::X | Key::Escape => KeyAction::None,
        }
    }

    fn escape(&mut self, ctx: &KeyContext<'_>) -> KeyAction {
        if ctx.viewing_card.is_some() {
            self.checklist_index = None;
            KeyAction::Close(EscapeTarget::Detail)
        } else if ctx.create_modal_open {
            KeyAction::Close(EscapeTarget::CreateModals)
        } else if ctx.shortcuts_help_open {
            KeyAction::Close(EscapeTarget::ShortcutsHelp)
        } else if ctx.search_active {
            KeyAction::Close(EscapeTarget::Search)
        } else if self.is_focused() {
            self.clear();
            KeyAction::Close(EscapeTarget::Focus)
        } else {
            KeyAction::None
        }
    }

    /// Keys while a card's detail view is open
    fn detail_key(&mut self, key: Key, card: &Card) -> KeyAction {
        let len = card.checklist.len();
        match key {
            Key::X => {
                self.checklist_index = None;
                KeyAction::Close(EscapeTarget::Detail)
            }
            Key::Down if len > 0 => {
                self.checklist_index = Some(wrap_next(self.checklist_index, len));
                KeyAction::FocusMoved
            }
            Key::Up if len > 0 => {
                self.checklist_index = Some(wrap_prev(self.checklist_index, len));
                KeyAction::FocusMoved
            }
            Key::Space => match self.checklist_index.and_then(|index| card.checklist.get(index)) {
                Some(item) => KeyAction::ToggleChecklistItem {
                    card_id: card.id.clone(),
                    item_id: item.id.clone(),
                },
                None => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::fixtures::list;
    use crate::shared::models::ChecklistItem;

    fn ctx(lists: &[BoardList]) -> KeyContext<'_> {
        KeyContext {
            lists,
            viewing_card: None,
            create_modal_open: false,
            shortcuts_help_open: false,
            search_active: false,
            input_focused: false,
        }
    }

    fn three_lists() -> Vec<BoardList> {
        vec![
            list("l1", 0, &["a1", "a2"]),
            list("l2", 1, &["b1", "b2", "b3"]),
            list("l3", 2, &[]),
        ]
    }

    #[test]
    fn test_right_wraps_around() {
        let lists = three_lists();
        let mut focus = KeyboardFocus {
            list_index: Some(1),
            card_index: Some(2),
            checklist_index: None,
        };
        focus.handle_key(Key::Right, &ctx(&lists));
        assert_eq!(focus.list_index, Some(2));
        assert_eq!(focus.card_index, Some(0));
        focus.handle_key(Key::Right, &ctx(&lists));
        assert_eq!(focus.list_index, Some(0));
    }

    #[test]
    fn test_left_from_unfocused_goes_to_last() {
        let lists = three_lists();
        let mut focus = KeyboardFocus::default();
        focus.handle_key(Key::Left, &ctx(&lists));
        assert_eq!(focus.list_index, Some(2));
    }

    #[test]
    fn test_down_without_focus_focuses_first_card() {
        let lists = three_lists();
        let mut focus = KeyboardFocus::default();
        assert_eq!(focus.handle_key(Key::Down, &ctx(&lists)), KeyAction::FocusMoved);
        assert_eq!((focus.list_index, focus.card_index), (Some(0), Some(0)));
    }

    #[test]
    fn test_up_down_wrap_within_list() {
        let lists = three_lists();
        let mut focus = KeyboardFocus {
            list_index: Some(1),
            card_index: Some(0),
            checklist_index: None,
        };
        focus.handle_key(Key::Up, &ctx(&lists));
        assert_eq!(focus.card_index, Some(2));
        focus.handle_key(Key::Down, &ctx(&lists));
        assert_eq!(focus.card_index, Some(0));
    }

    #[test]
    fn test_keys_ignored_while_typing_or_modal_open() {
        let lists = three_lists();
        let mut focus = KeyboardFocus::default();
        let typing = KeyContext { input_focused: true, ..ctx(&lists) };
        assert_eq!(focus.handle_key(Key::Right, &typing), KeyAction::None);
        let modal = KeyContext { create_modal_open: true, ..ctx(&lists) };
        assert_eq!(focus.handle_key(Key::N, &modal), KeyAction::None);
        assert_eq!(focus, KeyboardFocus::default());
    }

    #[test]
    fn test_space_opens_focused_card() {
        let lists = three_lists();
        let mut focus = KeyboardFocus {
            list_index: Some(1),
            card_index: Some(1),
            checklist_index: Some(3),
        };
        assert_eq!(
            focus.handle_key(Key::Space, &ctx(&lists)),
            KeyAction::OpenCard { card_id: "b2".to_string() }
        );
        assert_eq!(focus.checklist_index, None);

        let mut empty = KeyboardFocus { list_index: Some(2), card_index: Some(0), checklist_index: None };
        assert_eq!(empty.handle_key(Key::Space, &ctx(&lists)), KeyAction::None);
    }

    #[test]
    fn test_new_card_targets_focused_or_first_list() {
        let lists = three_lists();
        let mut focus = KeyboardFocus::default();
        assert_eq!(
            focus.handle_key(Key::N, &ctx(&lists)),
            KeyAction::OpenCreateCard { list_id: "l1".to_string() }
        );
        focus.list_index = Some(2);
        assert_eq!(
            focus.handle_key(Key::N, &ctx(&lists)),
            KeyAction::OpenCreateCard { list_id: "l3".to_string() }
        );
        assert_eq!(
            focus.handle_key(Key::N, &ctx(&[])),
            KeyAction::Notify("Create a list first before adding cards".to_string())
        );
    }

    #[test]
    fn test_escape_priority() {
        let lists = three_lists();
        let card = lists[0].cards[0].clone();
        let mut focus = KeyboardFocus { list_index: Some(0), card_index: Some(0), checklist_index: None };

        let everything = KeyContext {
            viewing_card: Some(&card),
            create_modal_open: true,
            shortcuts_help_open: true,
            search_active: true,
            ..ctx(&lists)
        };
        assert_eq!(focus.handle_key(Key::Escape, &everything), KeyAction::Close(EscapeTarget::Detail));

        let no_detail = KeyContext { viewing_card: None, ..everything };
        assert_eq!(
            focus.handle_key(Key::Escape, &no_detail),
            KeyAction::Close(EscapeTarget::CreateModals)
        );

        let help_and_search = KeyContext { create_modal_open: false, ..no_detail };
        assert_eq!(
            focus.handle_key(Key::Escape, &help_and_search),
            KeyAction::Close(EscapeTarget::ShortcutsHelp)
        );

        let search_only = KeyContext { shortcuts_help_open: false, ..help_and_search };
        assert_eq!(focus.handle_key(Key::Escape, &search_only), KeyAction::Close(EscapeTarget::Search));
        assert!(focus.is_focused());

        assert_eq!(focus.handle_key(Key::Escape, &ctx(&lists)), KeyAction::Close(EscapeTarget::Focus));
        assert!(!focus.is_focused());
        assert_eq!(focus.handle_key(Key::Escape, &ctx(&lists)), KeyAction::None);
    }

    #[test]
    fn test_escape_works_while_typing() {
        let lists = three_lists();
        let mut focus = KeyboardFocus::default();
        let typing = KeyContext { input_focused: true, search_active: true, ..ctx(&lists) };
        assert_eq!(focus.handle_key(Key::Escape, &typing), KeyAction::Close(EscapeTarget::Search));
    }

    #[test]
    fn test_checklist_navigation_wraps_and_toggles() {
        let lists = three_lists();
        let mut card = lists[0].cards[0].clone();
        card.checklist = vec![ChecklistItem::new("one"), ChecklistItem::new("two")];
        let detail = KeyContext { viewing_card: Some(&card), ..ctx(&lists) };
        let mut focus = KeyboardFocus::default();

        assert_eq!(focus.handle_key(Key::Space, &detail), KeyAction::None);
        focus.handle_key(Key::Down, &detail);
        assert_eq!(focus.checklist_index, Some(0));
        focus.handle_key(Key::Up, &detail);
        assert_eq!(focus.checklist_index, Some(1));
        focus.handle_key(Key::Down, &detail);
        assert_eq!(focus.checklist_index, Some(0));

        assert_eq!(
            focus.handle_key(Key::Space, &detail),
            KeyAction::ToggleChecklistItem {
                card_id: card.id.clone(),
                item_id: card.checklist[0].id.clone(),
            }
        );
        // list navigation is suspended inside the detail view
        assert_eq!(focus.handle_key(Key::Right, &detail), KeyAction::None);
        assert_eq!(focus.handle_key(Key::X, &detail), KeyAction::Close(EscapeTarget::Detail));
        assert_eq!(focus.checklist_index, None);
    }
}
