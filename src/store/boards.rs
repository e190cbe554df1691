use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::{info, warn};

use super::{Loading, StoreStatus};
use crate::api::{endpoints, ApiClient, ApiError};
use crate::shared::config::MAX_BOARDS_PER_USER;
use crate::shared::models::{Board, BoardCreate, BoardListResponse, BoardUpdate};

/// Boards owned by the signed-in user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardState {
    pub boards: Vec<Board>,
    pub current_board: Option<Board>,
    pub status: StoreStatus,
}

impl BoardState {
    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == board_id)
    }

    /// The server caps boards per user; the client only reflects it
    pub fn can_create_board(&self) -> bool {
        self.boards.len() < MAX_BOARDS_PER_USER
    }
}

#[derive(Debug, Clone)]
pub struct BoardStore {
    api: ApiClient,
    state: Arc<RwLock<BoardState>>,
}

impl BoardStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    pub fn snapshot(&self) -> BoardState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn can_create_board(&self) -> bool {
        self.snapshot().can_create_board()
    }

    pub fn set_current_board(&self, board: Option<Board>) {
        self.write().current_board = board;
    }

    pub fn clear_error(&self) {
        self.write().status.clear_error();
    }

    pub fn reset(&self) {
        *self.write() = BoardState::default();
    }

    fn begin(&self) {
        self.write().status.begin(Loading::Tracked);
    }

    fn fail(&self, err: &ApiError, fallback: &str) {
        warn!(error = %err, "{}", fallback);
        self.write().status.fail(Loading::Tracked, err.user_message(fallback));
    }

    pub async fn fetch_boards(&self) -> Result<(), ApiError> {
        self.begin();
        match self.api.get_json::<BoardListResponse>(endpoints::BOARDS).await {
            Ok(response) => {
                info!(count = response.boards.len(), total = response.total, "fetched boards");
                let mut state = self.write();
                state.boards = response.boards;
                state.status.finish(Loading::Tracked);
                Ok(())
            }
            Err(err) => {
                self.fail(&err, "Failed to fetch boards");
                Err(err)
            }
        }
    }

    pub async fn create_board(&self, data: BoardCreate) -> Result<Board, ApiError> {
        self.begin();
        match self.api.post_json::<_, Board>(endpoints::BOARDS, &data).await {
            Ok(created) => {
                info!(board_id = %created.id, "created board");
                let mut state = self.write();
                state.boards.push(created.clone());
                state.status.finish(Loading::Tracked);
                Ok(created)
            }
            Err(err) => {
                self.fail(&err, "Failed to create board");
                Err(err)
            }
        }
    }

    pub async fn update_board(&self, board_id: &str, data: BoardUpdate) -> Result<Board, ApiError> {
        self.begin();
        match self.api.put_json::<_, Board>(&endpoints::board(board_id), &data).await {
            Ok(updated) => {
                info!(board_id, "updated board");
                let mut state = self.write();
                for board in state.boards.iter_mut().filter(|board| board.id == board_id) {
                    *board = updated.clone();
                }
                if state.current_board.as_ref().is_some_and(|board| board.id == board_id) {
                    state.current_board = Some(updated.clone());
                }
                state.status.finish(Loading::Tracked);
                Ok(updated)
            }
            Err(err) => {
                self.fail(&err, "Failed to update board");
                Err(err)
            }
        }
    }

    /// Delete a board; the server removes its lists and cards
    pub async fn delete_board(&self, board_id: &str) -> Result<(), ApiError> {
        self.begin();
        match self.api.delete(&endpoints::board(board_id)).await {
            Ok(()) => {
                info!(board_id, "deleted board");
                let mut state = self.write();
                state.boards.retain(|board| board.id != board_id);
                if state.current_board.as_ref().is_some_and(|board| board.id == board_id) {
                    state.current_board = None;
                }
                state.status.finish(Loading::Tracked);
                Ok(())
            }
            Err(err) => {
                self.fail(&err, "Failed to delete board");
                Err(err)
            }
        }
    }
}
