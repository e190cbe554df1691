//! Session store against a mock board service

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use common::*;
use taskboard::api::ApiClient;
use taskboard::session::SessionStore;
use taskboard::shared::models::{LoginCredentials, RegisterData};

fn credentials() -> LoginCredentials {
    LoginCredentials {
        email: "ada@example.com".to_string(),
        password: "Secret123".to_string(),
    }
}

#[tokio::test]
async fn test_login_stores_and_persists_tokens() {
    let service = TestService::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "Secret123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("access-1", "refresh-1")))
        .expect(1)
        .mount(&service.server)
        .await;

    let store = SessionStore::new(service.api());
    let user = store.login(credentials()).await.unwrap();
    assert_eq!(user.username, "ada");

    let state = store.snapshot();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.error, None);
    assert_eq!(state.access_token.as_deref(), Some("access-1"));
    assert_eq!(state.refresh_token.as_deref(), Some("refresh-1"));

    // a fresh client picks the session back up from disk
    let restored = SessionStore::restore(ApiClient::new(service.config()).unwrap());
    let restored_state = restored.snapshot();
    assert!(restored_state.is_authenticated);
    assert_eq!(restored_state.user.map(|u| u.id), Some("u1".to_string()));
    assert!(!restored_state.is_loading);
}

#[tokio::test]
async fn test_login_failure_uses_server_detail() {
    let service = TestService::start().await;
    service
        .respond("POST", "/api/auth/login", 401, json!({"detail": "Incorrect email or password"}))
        .await;

    let store = SessionStore::new(service.api());
    let err = store.login(credentials()).await.unwrap_err();
    assert_eq!(err.status_code(), Some(401));
    // auth endpoints never go through the refresh path
    assert_eq!(service.hits("/api/auth/refresh").await, 0);

    let state = store.snapshot();
    assert!(!state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Incorrect email or password"));
}

#[tokio::test]
async fn test_login_failure_without_detail_falls_back() {
    let service = TestService::start().await;
    service.respond_empty("POST", "/api/auth/login", 500).await;

    let store = SessionStore::new(service.api());
    assert!(store.login(credentials()).await.is_err());
    assert_eq!(store.snapshot().error.as_deref(), Some("Login failed"));

    store.clear_error();
    assert_eq!(store.snapshot().error, None);
}

#[tokio::test]
async fn test_register_signs_in() {
    let service = TestService::start().await;
    service
        .respond("POST", "/api/auth/register", 200, token_json("access-9", "refresh-9"))
        .await;

    let store = SessionStore::new(service.api());
    let data = RegisterData {
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        password: "Secret123".to_string(),
        full_name: None,
    };
    store.register(data).await.unwrap();
    assert!(store.is_authenticated());
    assert_eq!(store.snapshot().access_token.as_deref(), Some("access-9"));

    let bodies = service.bodies("/api/auth/register").await;
    assert_eq!(bodies.len(), 1);
    assert!(bodies[0].get("full_name").is_none());
}

#[tokio::test]
async fn test_register_failure_message() {
    let service = TestService::start().await;
    service
        .respond("POST", "/api/auth/register", 400, json!({"detail": [{"msg": "bad"}]}))
        .await;

    let store = SessionStore::new(service.api());
    let data = RegisterData {
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        password: "Secret123".to_string(),
        full_name: None,
    };
    assert!(store.register(data).await.is_err());
    assert_eq!(store.snapshot().error.as_deref(), Some("Registration failed"));
}

#[tokio::test]
async fn test_logout_clears_memory_and_disk() {
    let service = TestService::start().await;
    let api = service.signed_in_api("access-1", "refresh-1");
    let session_file = service.config().session_file();
    assert!(session_file.exists());

    let store = SessionStore::new(api);
    store.logout();
    assert_eq!(store.snapshot(), Default::default());
    assert!(!session_file.exists());

    // idempotent when already signed out
    store.logout();
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn test_refresh_auth_without_token_logs_out() {
    let service = TestService::start().await;
    let store = SessionStore::new(service.api());
    assert!(!store.refresh_auth().await);
    assert!(!store.is_authenticated());
    assert_eq!(service.hits("/api/auth/refresh").await, 0);
}

#[tokio::test]
async fn test_refresh_auth_installs_new_pair() {
    let service = TestService::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refresh_token": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_json("access-2", "refresh-2")))
        .mount(&service.server)
        .await;

    let store = SessionStore::new(service.signed_in_api("access-1", "refresh-1"));
    assert!(store.refresh_auth().await);
    let state = store.snapshot();
    assert_eq!(state.access_token.as_deref(), Some("access-2"));
    assert_eq!(state.refresh_token.as_deref(), Some("refresh-2"));
}

#[tokio::test]
async fn test_refresh_auth_failure_logs_out() {
    let service = TestService::start().await;
    service
        .respond("POST", "/api/auth/refresh", 401, json!({"detail": "Invalid refresh token"}))
        .await;

    let store = SessionStore::new(service.signed_in_api("access-1", "refresh-1"));
    assert!(!store.refresh_auth().await);
    assert!(!store.is_authenticated());
    assert!(!service.config().session_file().exists());
}

#[tokio::test]
async fn test_fetch_me_replaces_user() {
    let service = TestService::start().await;
    let mut me = user_json();
    me["username"] = json!("countess");
    service.respond("GET", "/api/auth/me", 200, me).await;

    let store = SessionStore::new(service.signed_in_api("access-1", "refresh-1"));
    let user = store.fetch_me().await.unwrap();
    assert_eq!(user.username, "countess");
    assert_eq!(store.snapshot().user.map(|u| u.username), Some("countess".to_string()));
}

#[tokio::test]
async fn test_corrupt_persisted_session_is_ignored() {
    let service = TestService::start().await;
    let session_file = service.config().session_file();
    std::fs::create_dir_all(session_file.parent().unwrap()).unwrap();
    std::fs::write(&session_file, "{ not json").unwrap();

    let store = SessionStore::restore(service.api());
    assert!(!store.is_authenticated());
}
