//! HTTP Client
//!
//! `ApiClient` is the only component that talks to the board service. It
//! attaches the bearer token held by the shared session to every request and,
//! when a request comes back 401, exchanges the refresh token once and retries
//! the request once. If that path is exhausted the session is cleared
//! and `ApiError::SessionExpired` is returned, which the UI treats as "go to
//! the login screen".
//!
//! Nothing else is retried. No request is cancelled or coalesced.

pub mod endpoints;
pub mod error;

pub use error::ApiError;

use std::sync::Arc;

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::session::{SessionCell, SessionStorage};
use crate::shared::config::AppConfig;
use crate::shared::error::SharedError;
use crate::shared::models::{RefreshRequest, TokenResponse};
use error::extract_detail;

/// Token-bearing client for the board service. Clones share the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Arc<AppConfig>,
    session: SessionCell,
}

impl ApiClient {
    /// Client with an empty session persisted under `config.session_file()`
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let session = SessionCell::new(SessionStorage::new(config.session_file()));
        Self::with_session(config, session)
    }

    pub fn with_session(config: AppConfig, session: SessionCell) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            http,
            config: Arc::new(config),
            session,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionCell {
        &self.session
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, None).await?;
        decode(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.execute(Method::POST, path, Some(&body)).await?;
        decode(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.execute(Method::PUT, path, Some(&body)).await?;
        decode(response).await
    }

    /// POST whose response body is ignored
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = encode(body)?;
        self.execute(Method::POST, path, Some(&body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// POST without bearer token and without the refresh path (auth endpoints)
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.dispatch(Method::POST, path, Some(&body), None).await?;
        decode(ensure_success(response).await?).await
    }

    /// Exchange a refresh token for a new token pair
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, ApiError> {
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.post_public(endpoints::REFRESH, &request).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        token: Option<String>,
    ) -> Result<Response, ApiError> {
        let url = self.config.api_url(path);
        debug!(%method, %url, "dispatching request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        let response = self
            .dispatch(method.clone(), path, body, self.session.access_token())
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return ensure_success(response).await;
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            warn!(path, "401 without a refresh token, clearing session");
            self.session.expire();
            return Err(ApiError::SessionExpired);
        };

        match self.exchange_refresh_token(&refresh_token).await {
            Ok(tokens) => {
                if let Err(err) = self.session.install_tokens(tokens) {
                    warn!(error = %err, "could not persist refreshed tokens");
                }
            }
            Err(err) => {
                warn!(path, error = %err, "token refresh failed, clearing session");
                self.session.expire();
                return Err(ApiError::SessionExpired);
            }
        }

        let retry = self
            .dispatch(method, path, body, self.session.access_token())
            .await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            warn!(path, "still unauthorized after refresh, clearing session");
            self.session.expire();
            return Err(ApiError::SessionExpired);
        }
        ensure_success(retry).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let detail = extract_detail(&body);
    warn!(
        status = status.as_u16(),
        detail = detail.as_deref().unwrap_or(""),
        "request failed"
    );
    Err(ApiError::status(status.as_u16(), detail))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Validation(SharedError::from(e)))
}
