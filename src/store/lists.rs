use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::{info, warn};

use super::{patch, Loading, StoreStatus};
use crate::api::{endpoints, ApiClient, ApiError};
use crate::debug::validate_invariant;
use crate::shared::models::{BoardList, Card, ListCreate, ListReorder, ListUpdate, OrderMap};

/// Lists of the open board, each owning its cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
    pub lists: Vec<BoardList>,
    /// Flags of list operations
    pub status: StoreStatus,
    /// Flags of card operations
    pub card_status: StoreStatus,
}

impl ListState {
    pub fn list(&self, list_id: &str) -> Option<&BoardList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn find_card(&self, card_id: &str) -> Option<&Card> {
        self.lists
            .iter()
            .flat_map(|list| list.cards.iter())
            .find(|card| card.id == card_id)
    }

    /// The list currently holding `card_id`
    pub fn list_of_card(&self, card_id: &str) -> Option<&BoardList> {
        self.lists.iter().find(|list| list.contains_card(card_id))
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading() || self.card_status.is_loading()
    }
}

/// Owner of list and card data for one board.
///
/// List operations live here; card operations are in the sibling `cards`
/// module and patch the same state.
#[derive(Debug, Clone)]
pub struct ListStore {
    pub(super) api: ApiClient,
    pub(super) state: Arc<RwLock<ListState>>,
}

impl ListStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ListState::default())),
        }
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> ListState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub(super) fn write(&self) -> RwLockWriteGuard<'_, ListState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget every list, e.g. when leaving a board
    pub fn reset(&self) {
        *self.write() = ListState::default();
    }

    pub fn clear_error(&self) {
        self.write().status.clear_error();
    }

    fn begin(&self, loading: Loading) {
        self.write().status.begin(loading);
    }

    fn fail(&self, loading: Loading, err: &ApiError, fallback: &str) {
        warn!(error = %err, "{}", fallback);
        self.write().status.fail(loading, err.user_message(fallback));
    }

    /// Replace all lists with the server's, cards included
    pub async fn fetch_lists(&self, board_id: &str) -> Result<(), ApiError> {
        self.begin(Loading::Tracked);
        match self
            .api
            .get_json::<Vec<BoardList>>(&endpoints::board_lists(board_id))
            .await
        {
            Ok(lists) => {
                info!(board_id, count = lists.len(), "fetched lists");
                let mut state = self.write();
                state.lists = lists;
                state.status.finish(Loading::Tracked);
                Ok(())
            }
            Err(err) => {
                self.fail(Loading::Tracked, &err, "Failed to fetch lists");
                Err(err)
            }
        }
    }

    pub async fn create_list(&self, board_id: &str, data: ListCreate) -> Result<BoardList, ApiError> {
        self.begin(Loading::Tracked);
        match self
            .api
            .post_json::<_, BoardList>(&endpoints::board_lists(board_id), &data)
            .await
        {
            Ok(created) => {
                info!(board_id, list_id = %created.id, "created list");
                let mut state = self.write();
                state.lists = patch::append_list(&state.lists, created.clone());
                state.status.finish(Loading::Tracked);
                Ok(BoardList {
                    cards: Vec::new(),
                    ..created
                })
            }
            Err(err) => {
                self.fail(Loading::Tracked, &err, "Failed to create list");
                Err(err)
            }
        }
    }

    pub async fn update_list(&self, list_id: &str, data: ListUpdate) -> Result<BoardList, ApiError> {
        self.begin(Loading::Tracked);
        match self
            .api
            .put_json::<_, BoardList>(&endpoints::list(list_id), &data)
            .await
        {
            Ok(updated) => {
                info!(list_id, "updated list");
                let mut state = self.write();
                state.lists = patch::update_list(&state.lists, updated.clone());
                state.status.finish(Loading::Tracked);
                Ok(updated)
            }
            Err(err) => {
                self.fail(Loading::Tracked, &err, "Failed to update list");
                Err(err)
            }
        }
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<(), ApiError> {
        self.begin(Loading::Tracked);
        match self.api.delete(&endpoints::list(list_id)).await {
            Ok(()) => {
                info!(list_id, "deleted list");
                let mut state = self.write();
                state.lists = patch::remove_list(&state.lists, list_id);
                state.status.finish(Loading::Tracked);
                Ok(())
            }
            Err(err) => {
                self.fail(Loading::Tracked, &err, "Failed to delete list");
                Err(err)
            }
        }
    }

    /// Persist a new list order, then apply it locally
    pub async fn reorder_lists(&self, board_id: &str, list_orders: OrderMap) -> Result<(), ApiError> {
        let body = ListReorder { list_orders };
        match self.api.post_unit(&endpoints::reorder_lists(board_id), &body).await {
            Ok(()) => {
                info!(board_id, count = body.list_orders.len(), "reordered lists");
                let mut state = self.write();
                state.lists = patch::reorder_lists(&state.lists, &body.list_orders);
                validate_invariant(
                    crate::debug::is_sorted_by_order(&state.lists, |list| list.order),
                    "lists sorted by order after reorder",
                );
                Ok(())
            }
            Err(err) => {
                self.fail(Loading::Untracked, &err, "Failed to reorder lists");
                Err(err)
            }
        }
    }
}
