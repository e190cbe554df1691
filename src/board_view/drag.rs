//! Drag-and-drop planning
//!
//! A drag runs `Idle -> Dragging -> Idle`. When it ends, [`plan_drop`] turns
//! the dragged id and the drop target into at most one store call, and
//! [`execute_plan`] performs it. Planning is pure so every branch can be
//! checked without a server.

use tracing::warn;

use super::notify::Notification;
use crate::debug_log;
use crate::shared::models::{BoardList, Card, CardMove, OrderMap};
use crate::store::ListStore;

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSubject {
    Card { card_id: String, list_id: String },
    List { list_id: String },
}

impl DragSubject {
    pub fn id(&self) -> &str {
        match self {
            DragSubject::Card { card_id, .. } => card_id,
            DragSubject::List { list_id } => list_id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: DragSubject,
        /// Copy of the dragged card, drawn under the pointer
        overlay_card: Option<Card>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn active_id(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { active, .. } => Some(active.id()),
        }
    }

    pub fn overlay_card(&self) -> Option<&Card> {
        match self {
            DragState::Dragging { overlay_card, .. } => overlay_card.as_ref(),
            DragState::Idle => None,
        }
    }
}

/// Resolve a dragged id, cards first. Unknown ids stay idle.
pub fn begin_drag(id: &str, lists: &[BoardList]) -> DragState {
    for list in lists {
        if let Some(card) = list.cards.iter().find(|card| card.id == id) {
            return DragState::Dragging {
                active: DragSubject::Card {
                    card_id: card.id.clone(),
                    list_id: list.id.clone(),
                },
                overlay_card: Some(card.clone()),
            };
        }
    }
    match lists.iter().find(|list| list.id == id) {
        Some(list) => DragState::Dragging {
            active: DragSubject::List {
                list_id: list.id.clone(),
            },
            overlay_card: None,
        },
        None => DragState::Idle,
    }
}

/// Store call a finished drag translates into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    Noop,
    ReorderCards { list_id: String, card_orders: OrderMap },
    MoveCard { card_id: String, request: CardMove },
    ReorderLists { list_orders: OrderMap },
}

fn moved<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut next = items.to_vec();
    let item = next.remove(from);
    next.insert(to.min(next.len()), item);
    next
}

/// Plan the request for dropping `active_id` on `over_id`.
///
/// `over_id` may name a card or a list; `None` means no drop target.
pub fn plan_drop(active_id: &str, over_id: Option<&str>, lists: &[BoardList]) -> DropPlan {
    let Some(over_id) = over_id else {
        return DropPlan::Noop;
    };

    let plan = match lists.iter().position(|list| list.contains_card(active_id)) {
        Some(source_index) => plan_card_drop(active_id, over_id, source_index, lists),
        None => plan_list_drop(active_id, over_id, lists),
    };
    debug_log!(active_id, over_id, ?plan, "planned drop");
    plan
}

fn plan_card_drop(active_id: &str, over_id: &str, source_index: usize, lists: &[BoardList]) -> DropPlan {
    let source = &lists[source_index];
    let Some(target) = lists
        .iter()
        .find(|list| list.id == over_id || list.contains_card(over_id))
    else {
        return DropPlan::Noop;
    };

    if source.id == target.id {
        let Some(old_index) = source.card_index(active_id) else {
            return DropPlan::Noop;
        };
        // Dropping on the column itself sends the card to the bottom
        let new_index = source
            .card_index(over_id)
            .unwrap_or(source.cards.len().saturating_sub(1));
        if old_index == new_index {
            return DropPlan::Noop;
        }
        let reordered = moved(&source.cards, old_index, new_index);
        return DropPlan::ReorderCards {
            list_id: source.id.clone(),
            card_orders: OrderMap::dense(reordered.iter().map(|card| card.id.as_str())),
        };
    }

    let new_order = target.card_index(over_id).unwrap_or(target.cards.len());
    DropPlan::MoveCard {
        card_id: active_id.to_string(),
        request: CardMove {
            target_list_id: target.id.clone(),
            new_order: new_order as i64,
        },
    }
}

fn plan_list_drop(active_id: &str, over_id: &str, lists: &[BoardList]) -> DropPlan {
    let Some(old_index) = lists.iter().position(|list| list.id == active_id) else {
        return DropPlan::Noop;
    };
    // A list dropped over a card takes the position of that card's list
    let Some(new_index) = lists
        .iter()
        .position(|list| list.id == over_id || list.contains_card(over_id))
    else {
        return DropPlan::Noop;
    };
    if old_index == new_index {
        return DropPlan::Noop;
    }
    let reordered = moved(lists, old_index, new_index);
    DropPlan::ReorderLists {
        list_orders: OrderMap::dense(reordered.iter().map(|list| list.id.as_str())),
    }
}

/// Run a plan against the store. Returns the notification to show, if any;
/// only a cross-list move announces success.
pub async fn execute_plan(store: &ListStore, board_id: &str, plan: DropPlan) -> Option<Notification> {
    match plan {
        DropPlan::Noop => None,
        DropPlan::ReorderCards { list_id, card_orders } => {
            match store.reorder_cards(&list_id, card_orders).await {
                Ok(()) => None,
                Err(err) => {
                    warn!(list_id, error = %err, "card reorder failed");
                    Some(Notification::error("Failed to reorder cards"))
                }
            }
        }
        DropPlan::MoveCard { card_id, request } => match store.move_card(&card_id, request).await {
            Ok(_) => Some(Notification::success("Card moved successfully")),
            Err(err) => {
                warn!(card_id, error = %err, "card move failed");
                Some(Notification::error("Failed to move card"))
            }
        },
        DropPlan::ReorderLists { list_orders } => {
            match store.reorder_lists(board_id, list_orders).await {
                Ok(()) => None,
                Err(err) => {
                    warn!(board_id, error = %err, "list reorder failed");
                    Some(Notification::error("Failed to reorder lists"))
                }
            }
        }
    }
}
