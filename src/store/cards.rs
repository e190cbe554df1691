//! Card operations of the list store.
//!
//! Cards have no store of their own: every confirmed write is patched
//! straight into the lists that hold them. Status flags are kept apart from
//! the list flags in `ListState::card_status`.

use tracing::{info, warn};

use super::{patch, ListStore, Loading};
use crate::api::{endpoints, ApiError};
use crate::debug::{card_occurrences, is_sorted_by_order, validate_invariant};
use crate::shared::models::{Card, CardCreate, CardMove, CardReorder, CardUpdate, OrderMap};

impl ListStore {
    pub fn clear_card_error(&self) {
        self.write().card_status.clear_error();
    }

    fn begin_card(&self, loading: Loading) {
        self.write().card_status.begin(loading);
    }

    fn fail_card(&self, loading: Loading, err: &ApiError, fallback: &str) {
        warn!(error = %err, "{}", fallback);
        self.write().card_status.fail(loading, err.user_message(fallback));
    }

    /// Create a card and append it to its list
    pub async fn create_card(&self, list_id: &str, data: CardCreate) -> Result<Card, ApiError> {
        self.begin_card(Loading::Tracked);
        match self
            .api
            .post_json::<_, Card>(&endpoints::list_cards(list_id), &data)
            .await
        {
            Ok(created) => {
                info!(list_id, card_id = %created.id, "created card");
                let mut state = self.write();
                state.lists = patch::append_card(&state.lists, list_id, created.clone());
                state.card_status.finish(Loading::Tracked);
                Ok(created)
            }
            Err(err) => {
                self.fail_card(Loading::Tracked, &err, "Failed to create card");
                Err(err)
            }
        }
    }

    pub async fn update_card(&self, card_id: &str, data: CardUpdate) -> Result<Card, ApiError> {
        self.begin_card(Loading::Tracked);
        match self.api.put_json::<_, Card>(&endpoints::card(card_id), &data).await {
            Ok(updated) => {
                info!(card_id, "updated card");
                let mut state = self.write();
                state.lists = patch::replace_card(&state.lists, &updated);
                state.card_status.finish(Loading::Tracked);
                Ok(updated)
            }
            Err(err) => {
                self.fail_card(Loading::Tracked, &err, "Failed to update card");
                Err(err)
            }
        }
    }

    pub async fn delete_card(&self, card_id: &str) -> Result<(), ApiError> {
        self.begin_card(Loading::Tracked);
        match self.api.delete(&endpoints::card(card_id)).await {
            Ok(()) => {
                info!(card_id, "deleted card");
                let mut state = self.write();
                state.lists = patch::remove_card(&state.lists, card_id);
                state.card_status.finish(Loading::Tracked);
                Ok(())
            }
            Err(err) => {
                self.fail_card(Loading::Tracked, &err, "Failed to delete card");
                Err(err)
            }
        }
    }

    /// Move a card to another list at `new_order`
    pub async fn move_card(&self, card_id: &str, data: CardMove) -> Result<Card, ApiError> {
        match self
            .api
            .post_json::<_, Card>(&endpoints::move_card(card_id), &data)
            .await
        {
            Ok(moved) => {
                info!(
                    card_id,
                    target_list_id = %data.target_list_id,
                    new_order = data.new_order,
                    "moved card"
                );
                let mut state = self.write();
                state.lists = patch::move_card(&state.lists, card_id, &data.target_list_id, moved.clone());
                validate_invariant(
                    card_occurrences(&state.lists, &moved.id) <= 1,
                    "moved card held by at most one list",
                );
                Ok(moved)
            }
            Err(err) => {
                self.fail_card(Loading::Untracked, &err, "Failed to move card");
                Err(err)
            }
        }
    }

    /// Persist a new card order for one list, then apply it locally
    pub async fn reorder_cards(&self, list_id: &str, card_orders: OrderMap) -> Result<(), ApiError> {
        let body = CardReorder { card_orders };
        match self.api.post_unit(&endpoints::reorder_cards(list_id), &body).await {
            Ok(()) => {
                info!(list_id, count = body.card_orders.len(), "reordered cards");
                let mut state = self.write();
                state.lists = patch::reorder_cards(&state.lists, list_id, &body.card_orders);
                if let Some(list) = state.list(list_id) {
                    validate_invariant(
                        is_sorted_by_order(&list.cards, |card| card.order),
                        "cards sorted by order after reorder",
                    );
                }
                Ok(())
            }
            Err(err) => {
                self.fail_card(Loading::Untracked, &err, "Failed to reorder cards");
                Err(err)
            }
        }
    }
}
