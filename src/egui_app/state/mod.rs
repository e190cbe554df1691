use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Instant;

use chrono::Local;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};
use crate::board_view::{self, execute_plan, BoardView, DropPlan, Key, KeyAction, Notification, Notifications};
use crate::egui_app::forms::{BoardForm, CardForm, ListForm, LoginForm, RegisterForm};
use crate::egui_app::types::{AppEvent, AppView, FormKind};
use crate::session::SessionStore;
use crate::shared::config::{AppConfig, MAX_BOARDS_PER_USER};
use crate::shared::error::SharedError;
use crate::store::{BoardStore, ListStore};

/// Central application state shared across egui views.
///
/// Requests run on the tokio runtime; each one reports back through an
/// [`AppEvent`] that [`AppState::poll_events`] applies on the UI thread.
pub struct AppState {
    pub config: AppConfig,
    runtime: Handle,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,

    pub session: SessionStore,
    pub boards: BoardStore,
    pub lists: ListStore,

    pub current_view: AppView,
    /// View state of the open board, if any
    pub board_view: Option<BoardView>,

    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub is_register_mode: bool,
    pub board_form: BoardForm,
    pub show_create_board: bool,
    pub list_form: ListForm,
    /// List being renamed and its form
    pub renaming_list: Option<(String, ListForm)>,
    pub card_form: CardForm,
    /// Edit form of the card in the detail window
    pub card_edit: Option<CardForm>,
    /// Local validation failure of the form on screen
    pub form_error: Option<String>,

    pub notifications: Notifications,
}

impl AppState {
    /// Build the stores, restore any persisted session and, when signed in,
    /// start loading boards.
    pub fn new(config: AppConfig, runtime: Handle) -> Result<Self, ApiError> {
        let api = ApiClient::new(config.clone())?;
        let session = SessionStore::restore(api.clone());
        let boards = BoardStore::new(api.clone());
        let lists = ListStore::new(api);
        let (events_tx, events_rx) = channel();

        let authenticated = session.is_authenticated();
        let mut state = Self {
            config,
            runtime,
            events_tx,
            events_rx,
            session,
            boards,
            lists,
            current_view: if authenticated { AppView::Boards } else { AppView::Auth },
            board_view: None,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            is_register_mode: false,
            board_form: BoardForm::default(),
            show_create_board: false,
            list_form: ListForm::default(),
            renaming_list: None,
            card_form: CardForm::default(),
            card_edit: None,
            form_error: None,
            notifications: Notifications::new(),
        };
        if authenticated {
            state.refresh_boards();
        }
        info!(authenticated, api = %state.config.api_base_url, "app state initialized");
        Ok(state)
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Vec<AppEvent>> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            for event in task.await {
                // the receiver only goes away on shutdown
                let _ = tx.send(event);
            }
        });
    }

    fn reject(&mut self, err: SharedError) {
        debug!(error = %err, "form rejected");
        self.form_error = Some(err.user_message().to_string());
    }

    /// Apply finished requests. Called once per frame.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
        if let Some(view) = self.board_view.as_mut() {
            for notification in view.notifications.take_all() {
                self.notifications.push(notification);
            }
        }
        // a failed refresh inside any request clears the session
        if self.current_view != AppView::Auth && !self.session.is_authenticated() {
            self.on_session_expired();
        }
        self.notifications.prune(Instant::now());
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SignedIn(Ok(user)) => {
                info!(user_id = %user.id, "signed in as {}", user.username);
                self.login_form = LoginForm::default();
                self.register_form = RegisterForm::default();
                self.is_register_mode = false;
                self.form_error = None;
                self.current_view = AppView::Boards;
                self.refresh_boards();
            }
            AppEvent::SignedIn(Err(err)) => {
                // the session store already holds the message
                debug!(error = %err, "sign in failed");
                self.register_form.clear_passwords();
            }
            AppEvent::Notify(notification) => self.notifications.push(notification),
            AppEvent::FormSubmitted(kind) => self.close_form(kind),
            AppEvent::BoardLoadFailed => self.leave_board(),
            AppEvent::SessionExpired => self.on_session_expired(),
        }
    }

    fn close_form(&mut self, kind: FormKind) {
        self.form_error = None;
        match kind {
            FormKind::CreateBoard => {
                self.board_form = BoardForm::default();
                self.show_create_board = false;
            }
            FormKind::CreateList => {
                self.list_form = ListForm::default();
                if let Some(view) = self.board_view.as_mut() {
                    view.modals.create_list = false;
                }
            }
            FormKind::RenameList => self.renaming_list = None,
            FormKind::CreateCard => {
                self.card_form = CardForm::default();
                if let Some(view) = self.board_view.as_mut() {
                    view.modals.create_card_list = None;
                }
            }
            FormKind::EditCard => self.card_edit = None,
        }
    }

    fn reset_stores(&mut self) {
        self.boards.reset();
        self.lists.reset();
        self.board_view = None;
        self.card_edit = None;
        self.renaming_list = None;
    }

    fn on_session_expired(&mut self) {
        if self.current_view == AppView::Auth {
            return;
        }
        warn!("session expired, returning to sign in");
        self.reset_stores();
        self.current_view = AppView::Auth;
        self.notifications.error("Session expired. Please sign in again.");
    }

    // ---- auth ----

    pub fn submit_login(&mut self) {
        let credentials = match self.login_form.to_credentials() {
            Ok(credentials) => credentials,
            Err(err) => return self.reject(err),
        };
        self.form_error = None;
        let session = self.session.clone();
        self.spawn(async move { vec![AppEvent::SignedIn(session.login(credentials).await)] });
    }

    pub fn submit_register(&mut self) {
        let data = match self.register_form.to_register_data() {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        self.form_error = None;
        let session = self.session.clone();
        self.spawn(async move {
            let result = session.register(data).await;
            let mut events = Vec::new();
            if result.is_ok() {
                events.push(AppEvent::Notify(Notification::success("Registration successful!")));
            }
            events.push(AppEvent::SignedIn(result));
            events
        });
    }

    pub fn toggle_auth_mode(&mut self) {
        self.is_register_mode = !self.is_register_mode;
        self.form_error = None;
        self.session.clear_error();
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.reset_stores();
        self.current_view = AppView::Auth;
        self.notifications.success("Logged out successfully");
    }

    // ---- boards ----

    pub fn refresh_boards(&mut self) {
        let boards = self.boards.clone();
        self.spawn(async move {
            let result = boards.fetch_boards().await;
            AppEvent::from_result(&result, None, "Failed to load boards")
        });
    }

    pub fn submit_create_board(&mut self) {
        if !self.boards.can_create_board() {
            self.form_error = Some(format!("You can create at most {} boards", MAX_BOARDS_PER_USER));
            return;
        }
        let data = match self.board_form.to_create() {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        let boards = self.boards.clone();
        self.spawn(async move {
            let result = boards.create_board(data).await;
            let mut events = AppEvent::from_result(&result, Some("Board created successfully!"), "Failed to create board");
            if result.is_ok() {
                events.push(AppEvent::FormSubmitted(FormKind::CreateBoard));
            }
            events
        });
    }

    pub fn delete_board(&mut self, board_id: &str) {
        let boards = self.boards.clone();
        let board_id = board_id.to_string();
        self.spawn(async move {
            let result = boards.delete_board(&board_id).await;
            AppEvent::from_result(&result, Some("Board deleted successfully"), "Failed to delete board")
        });
    }

    pub fn open_board(&mut self, board_id: &str) {
        let board = self.boards.snapshot().board(board_id).cloned();
        self.boards.set_current_board(board);
        self.lists.reset();
        self.board_view = Some(BoardView::new(board_id));
        self.current_view = AppView::Board(board_id.to_string());

        let lists = self.lists.clone();
        let board_id = board_id.to_string();
        self.spawn(async move {
            let result = lists.fetch_lists(&board_id).await;
            let mut events = AppEvent::from_result(&result, None, "Failed to load board");
            if matches!(&result, Err(err) if !err.is_session_expired()) {
                events.push(AppEvent::BoardLoadFailed);
            }
            events
        });
    }

    pub fn leave_board(&mut self) {
        self.board_view = None;
        self.card_edit = None;
        self.renaming_list = None;
        self.lists.reset();
        self.boards.set_current_board(None);
        if self.current_view != AppView::Auth {
            self.current_view = AppView::Boards;
        }
    }

    fn open_board_id(&self) -> Option<String> {
        self.board_view.as_ref().map(|view| view.board_id.clone())
    }

    // ---- lists ----

    pub fn submit_create_list(&mut self) {
        let Some(board_id) = self.open_board_id() else {
            return;
        };
        let data = match self.list_form.to_create() {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        let lists = self.lists.clone();
        self.spawn(async move {
            let result = lists.create_list(&board_id, data).await;
            let mut events = AppEvent::from_result(&result, Some("List created successfully!"), "Failed to create list");
            if result.is_ok() {
                events.push(AppEvent::FormSubmitted(FormKind::CreateList));
            }
            events
        });
    }

    pub fn begin_rename_list(&mut self, list_id: &str) {
        let title = self
            .lists
            .snapshot()
            .list(list_id)
            .map(|list| list.title.clone())
            .unwrap_or_default();
        self.renaming_list = Some((list_id.to_string(), ListForm { title }));
    }

    pub fn submit_rename_list(&mut self) {
        let Some((list_id, form)) = self.renaming_list.clone() else {
            return;
        };
        let data = match form.to_update() {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        let lists = self.lists.clone();
        self.spawn(async move {
            let result = lists.update_list(&list_id, data).await;
            let mut events = AppEvent::from_result(&result, Some("List updated"), "Failed to update list");
            if result.is_ok() {
                events.push(AppEvent::FormSubmitted(FormKind::RenameList));
            }
            events
        });
    }

    pub fn delete_list(&mut self, list_id: &str) {
        let lists = self.lists.clone();
        let list_id = list_id.to_string();
        self.spawn(async move {
            let result = lists.delete_list(&list_id).await;
            AppEvent::from_result(&result, Some("List deleted"), "Failed to delete list")
        });
    }

    // ---- cards ----

    pub fn submit_create_card(&mut self) {
        let Some(list_id) = self
            .board_view
            .as_ref()
            .and_then(|view| view.modals.create_card_list.clone())
        else {
            return;
        };
        let data = match self.card_form.to_create(&Local) {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        let lists = self.lists.clone();
        self.spawn(async move {
            let result = lists.create_card(&list_id, data).await;
            let mut events = AppEvent::from_result(&result, Some("Card created successfully!"), "Failed to create card");
            if result.is_ok() {
                events.push(AppEvent::FormSubmitted(FormKind::CreateCard));
            }
            events
        });
    }

    /// Open the edit form for the card in the detail window
    pub fn begin_edit_card(&mut self, card_id: &str) {
        self.form_error = None;
        self.card_edit = self
            .lists
            .snapshot()
            .find_card(card_id)
            .map(|card| CardForm::from_card(card, &Local));
    }

    pub fn submit_card_edit(&mut self, card_id: &str) {
        let Some(form) = self.card_edit.as_ref() else {
            return;
        };
        let data = match form.to_update(&Local) {
            Ok(data) => data,
            Err(err) => return self.reject(err),
        };
        let lists = self.lists.clone();
        let card_id = card_id.to_string();
        self.spawn(async move {
            let result = lists.update_card(&card_id, data).await;
            let mut events = AppEvent::from_result(&result, Some("Card updated"), "Failed to update card");
            if result.is_ok() {
                events.push(AppEvent::FormSubmitted(FormKind::EditCard));
            }
            events
        });
    }

    pub fn delete_card(&mut self, card_id: &str) {
        if let Some(view) = self.board_view.as_mut() {
            if view.modals.viewing_card_id.as_deref() == Some(card_id) {
                view.close(board_view::EscapeTarget::Detail);
                self.card_edit = None;
            }
        }
        let lists = self.lists.clone();
        let card_id = card_id.to_string();
        self.spawn(async move {
            let result = lists.delete_card(&card_id).await;
            AppEvent::from_result(&result, Some("Card deleted"), "Failed to delete card")
        });
    }

    pub fn toggle_checklist_item(&mut self, card_id: &str, item_id: &str) {
        let Some(update) = self
            .lists
            .snapshot()
            .find_card(card_id)
            .map(|card| board_view::toggle_checklist_item(card, item_id))
        else {
            return;
        };
        let lists = self.lists.clone();
        let card_id = card_id.to_string();
        self.spawn(async move {
            let result = lists.update_card(&card_id, update).await;
            AppEvent::from_result(&result, None, "Failed to update checklist")
        });
    }

    // ---- board page input ----

    pub fn begin_drag(&mut self, id: &str) {
        let lists = self.lists.snapshot().lists;
        if let Some(view) = self.board_view.as_mut() {
            view.begin_drag(id, &lists);
        }
    }

    /// End the active drag over `over` (a card or list id, or nothing)
    pub fn finish_drag(&mut self, over: Option<&str>) {
        let lists = self.lists.snapshot().lists;
        let Some(view) = self.board_view.as_mut() else {
            return;
        };
        let plan = view.finish_drag(over, &lists);
        if plan == DropPlan::Noop {
            return;
        }
        let store = self.lists.clone();
        let board_id = view.board_id.clone();
        self.spawn(async move {
            execute_plan(&store, &board_id, plan)
                .await
                .map(AppEvent::Notify)
                .into_iter()
                .collect()
        });
    }

    pub fn handle_key(&mut self, key: Key, input_focused: bool) {
        let lists = self.lists.snapshot().lists;
        let Some(view) = self.board_view.as_mut() else {
            return;
        };
        match view.handle_key(key, &lists, input_focused) {
            KeyAction::ToggleChecklistItem { card_id, item_id } => {
                self.toggle_checklist_item(&card_id, &item_id)
            }
            KeyAction::Close(_) => {
                if view.modals.viewing_card_id.is_none() {
                    self.card_edit = None;
                }
                if !view.modals.create_open() {
                    self.form_error = None;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(runtime: &tokio::runtime::Runtime, dir: &std::path::Path) -> AppState {
        let config = AppConfig::builder()
            .api_base_url("http://127.0.0.1:9")
            .storage_dir(dir)
            .build()
            .unwrap();
        AppState::new(config, runtime.handle().clone()).unwrap()
    }

    #[test]
    fn test_starts_signed_out_without_persisted_session() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let app = state(&runtime, dir.path());
        assert_eq!(app.current_view, AppView::Auth);
        assert!(app.board_view.is_none());
    }

    #[test]
    fn test_invalid_login_never_leaves_the_form() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&runtime, dir.path());
        app.submit_login();
        assert!(app.form_error.is_some());
        app.poll_events();
        assert_eq!(app.current_view, AppView::Auth);
    }

    #[test]
    fn test_create_card_form_closes_on_submit_event() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let mut app = state(&runtime, dir.path());
        let mut view = BoardView::new("b1");
        view.modals.create_card_list = Some("l1".to_string());
        app.board_view = Some(view);
        app.card_form.title = "Draft".to_string();

        app.handle_event(AppEvent::FormSubmitted(FormKind::CreateCard));
        assert!(app.card_form.title.is_empty());
        assert_eq!(app.board_view.as_ref().unwrap().modals.create_card_list, None);
    }
}
