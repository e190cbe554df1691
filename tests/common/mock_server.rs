//! Mock board service for integration tests
//!
//! Each [`TestService`] owns a wiremock server and a temporary storage
//! directory, so persisted sessions never leak between tests.

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskboard::api::ApiClient;
use taskboard::shared::models::TokenResponse;
use taskboard::shared::AppConfig;
use taskboard::store::{BoardStore, ListStore};

use super::fixtures::token_json;

pub struct TestService {
    pub server: MockServer,
    pub storage: TempDir,
}

impl TestService {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            storage: tempfile::tempdir().expect("temp storage dir"),
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::builder()
            .api_base_url(self.server.uri())
            .storage_dir(self.storage.path())
            .build()
            .expect("valid test config")
    }

    /// Client with no session
    pub fn api(&self) -> ApiClient {
        ApiClient::new(self.config()).expect("client")
    }

    /// Client already holding `access`/`refresh` tokens
    pub fn signed_in_api(&self, access: &str, refresh: &str) -> ApiClient {
        let api = self.api();
        let tokens: TokenResponse = serde_json::from_value(token_json(access, refresh)).expect("token fixture");
        api.session().install_tokens(tokens).expect("install tokens");
        api
    }

    pub fn list_store(&self) -> ListStore {
        ListStore::new(self.signed_in_api("access-1", "refresh-1"))
    }

    pub fn board_store(&self) -> BoardStore {
        BoardStore::new(self.signed_in_api("access-1", "refresh-1"))
    }

    /// Answer `verb path` with `status` and a JSON body
    pub async fn respond(&self, verb: &str, route: &str, status: u16, body: serde_json::Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb path` with an empty success
    pub async fn respond_empty(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Bodies of every request received on `route`, parsed as JSON
    pub async fn bodies(&self, route: &str) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == route)
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }

    pub async fn hits(&self, route: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.url.path() == route)
            .count()
    }
}
