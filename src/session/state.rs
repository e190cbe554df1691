use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use super::storage::{PersistedSession, SessionStorage};
use crate::api::ApiError;
use crate::shared::models::{TokenResponse, User};

/// Authentication state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            user: self.user.clone(),
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            is_authenticated: self.is_authenticated,
        }
    }

    fn apply_persisted(&mut self, persisted: PersistedSession) {
        self.user = persisted.user;
        self.access_token = persisted.access_token;
        self.refresh_token = persisted.refresh_token;
        self.is_authenticated = persisted.is_authenticated;
    }

    fn apply_tokens(&mut self, tokens: TokenResponse) {
        self.user = Some(tokens.user);
        self.access_token = Some(tokens.access_token);
        self.refresh_token = Some(tokens.refresh_token);
        self.is_authenticated = true;
    }
}

/// Session shared between the HTTP client and the session store.
///
/// Clones share state. The lock is only taken for short synchronous sections.
#[derive(Debug, Clone)]
pub struct SessionCell {
    state: Arc<RwLock<SessionState>>,
    storage: Arc<SessionStorage>,
}

impl SessionCell {
    pub fn new(storage: SessionStorage) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            storage: Arc::new(storage),
        }
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access_token
            .clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh_token
            .clone()
    }

    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Load the persisted subset into memory; returns whether anything was found
    pub fn restore(&self) -> Result<bool, ApiError> {
        match self.storage.load()? {
            Some(persisted) => {
                self.update(|state| state.apply_persisted(persisted));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Store a fresh token pair and its user, then persist
    pub fn install_tokens(&self, tokens: TokenResponse) -> Result<(), ApiError> {
        let persisted = self.update(|state| {
            state.apply_tokens(tokens);
            state.persisted()
        });
        self.storage.save(&persisted)
    }

    /// Reset every field and forget the persisted session
    pub fn expire(&self) {
        self.update(|state| *state = SessionState::default());
        if let Err(err) = self.storage.clear() {
            warn!(error = %err, "could not remove persisted session");
        }
    }
}
