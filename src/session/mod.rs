//! Session Store
//!
//! Holds the signed-in user and the token pair. The state itself lives in a
//! [`SessionCell`] shared with the [`ApiClient`], so tokens refreshed by the
//! client on a 401 are visible here immediately and vice versa.
//!
//! `user`, both tokens and the authenticated flag are persisted through
//! [`SessionStorage`]; loading and error flags live in memory only.

mod state;
mod storage;

pub use state::{SessionCell, SessionState};
pub use storage::{PersistedSession, SessionStorage};

use tracing::{info, warn};

use crate::api::{endpoints, ApiClient, ApiError};
use crate::shared::models::{LoginCredentials, RegisterData, TokenResponse, User};

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Login, registration, logout and token refresh
#[derive(Debug, Clone)]
pub struct SessionStore {
    api: ApiClient,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Store whose session is loaded from disk. A corrupt file is logged and
    /// treated as absent.
    pub fn restore(api: ApiClient) -> Self {
        match api.session().restore() {
            Ok(true) => info!("restored persisted session"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "ignoring unreadable persisted session"),
        }
        Self { api }
    }

    pub fn snapshot(&self) -> SessionState {
        self.api.session().snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated
    }

    pub async fn login(&self, credentials: LoginCredentials) -> Result<User, ApiError> {
        self.authenticate(endpoints::LOGIN, &credentials, LOGIN_FAILED).await
    }

    pub async fn register(&self, data: RegisterData) -> Result<User, ApiError> {
        self.authenticate(endpoints::REGISTER, &data, REGISTRATION_FAILED).await
    }

    async fn authenticate<B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<User, ApiError> {
        let session = self.api.session();
        session.update(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.api.post_public::<_, TokenResponse>(path, body).await {
            Ok(tokens) => {
                let user = tokens.user.clone();
                if let Err(err) = session.install_tokens(tokens) {
                    warn!(error = %err, "could not persist session");
                }
                session.update(|state| state.is_loading = false);
                info!(user_id = %user.id, "signed in");
                Ok(user)
            }
            Err(err) => {
                let message = err.user_message(fallback);
                warn!(path, error = %err, "authentication failed");
                session.update(|state| {
                    state.error = Some(message);
                    state.is_loading = false;
                });
                Err(err)
            }
        }
    }

    /// Forget the session locally. Always succeeds, even when signed out.
    pub fn logout(&self) {
        self.api.session().expire();
        info!("signed out");
    }

    /// Exchange the held refresh token for a new pair. Any failure, or no
    /// refresh token, logs out. Returns whether the session is still valid.
    pub async fn refresh_auth(&self) -> bool {
        let Some(refresh_token) = self.api.session().refresh_token() else {
            self.logout();
            return false;
        };
        match self.api.exchange_refresh_token(&refresh_token).await {
            Ok(tokens) => {
                if let Err(err) = self.api.session().install_tokens(tokens) {
                    warn!(error = %err, "could not persist refreshed session");
                }
                true
            }
            Err(err) => {
                warn!(error = %err, "token refresh failed");
                self.logout();
                false
            }
        }
    }

    /// Reload the current user from `GET /api/auth/me`
    pub async fn fetch_me(&self) -> Result<User, ApiError> {
        let user: User = self.api.get_json(endpoints::ME).await?;
        let session = self.api.session();
        let persisted = session.update(|state| {
            state.user = Some(user.clone());
            state.persisted()
        });
        if let Err(err) = session.storage().save(&persisted) {
            warn!(error = %err, "could not persist session");
        }
        Ok(user)
    }

    pub fn clear_error(&self) {
        self.api.session().update(|state| state.error = None);
    }
}
