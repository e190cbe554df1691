//! Board store against a mock board service

mod common;

use pretty_assertions::assert_eq;
use serde_json::json;

use common::*;
use taskboard::shared::models::{BoardCreate, BoardUpdate};

#[tokio::test]
async fn test_fetch_boards_replaces_list() {
    let service = TestService::start().await;
    service
        .respond(
            "GET",
            "/api/boards",
            200,
            boards_json(&[board_json("b1", "Roadmap"), board_json("b2", "Chores")]),
        )
        .await;

    let store = service.board_store();
    store.fetch_boards().await.unwrap();

    let state = store.snapshot();
    let titles: Vec<_> = state.boards.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Roadmap", "Chores"]);
    assert!(!state.status.is_loading());
    assert_eq!(state.status.error(), None);
}

#[tokio::test]
async fn test_create_board_appends() {
    let service = TestService::start().await;
    service
        .respond("GET", "/api/boards", 200, boards_json(&[board_json("b1", "Roadmap")]))
        .await;
    service.respond("POST", "/api/boards", 200, board_json("b2", "Launch")).await;

    let store = service.board_store();
    store.fetch_boards().await.unwrap();
    let created = store
        .create_board(BoardCreate {
            title: "Launch".to_string(),
            description: None,
            background_color: Some("#10b981".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(created.id, "b2");
    let ids: Vec<_> = store.snapshot().boards.into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["b1", "b2"]);
    assert_eq!(
        service.bodies("/api/boards").await,
        vec![json!({"title": "Launch", "background_color": "#10b981"})]
    );
}

#[tokio::test]
async fn test_update_board_replaces_current_board() {
    let service = TestService::start().await;
    service
        .respond("GET", "/api/boards", 200, boards_json(&[board_json("b1", "Roadmap")]))
        .await;
    service
        .respond("PUT", "/api/boards/b1", 200, board_json("b1", "Roadmap 2026"))
        .await;

    let store = service.board_store();
    store.fetch_boards().await.unwrap();
    store.set_current_board(store.snapshot().board("b1").cloned());

    let update = BoardUpdate {
        title: Some("Roadmap 2026".to_string()),
        ..BoardUpdate::default()
    };
    store.update_board("b1", update).await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.boards[0].title, "Roadmap 2026");
    assert_eq!(state.current_board.map(|b| b.title), Some("Roadmap 2026".to_string()));
}

#[tokio::test]
async fn test_delete_board_clears_current_board() {
    let service = TestService::start().await;
    service
        .respond(
            "GET",
            "/api/boards",
            200,
            boards_json(&[board_json("b1", "Roadmap"), board_json("b2", "Chores")]),
        )
        .await;
    service.respond_empty("DELETE", "/api/boards/b1", 204).await;

    let store = service.board_store();
    store.fetch_boards().await.unwrap();
    store.set_current_board(store.snapshot().board("b1").cloned());
    store.delete_board("b1").await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.boards.len(), 1);
    assert_eq!(state.boards[0].id, "b2");
    assert_eq!(state.current_board, None);
}

#[tokio::test]
async fn test_failed_create_keeps_boards_and_records_detail() {
    let service = TestService::start().await;
    service
        .respond("GET", "/api/boards", 200, boards_json(&[board_json("b1", "Roadmap")]))
        .await;
    service
        .respond("POST", "/api/boards", 400, json!({"detail": "Maximum number of boards reached"}))
        .await;

    let store = service.board_store();
    store.fetch_boards().await.unwrap();
    let before = store.snapshot().boards;

    let result = store
        .create_board(BoardCreate {
            title: "Another".to_string(),
            description: None,
            background_color: None,
        })
        .await;
    assert!(result.is_err());

    let state = store.snapshot();
    assert_eq!(state.boards, before);
    assert!(!state.status.is_loading());
    assert_eq!(state.status.error(), Some("Maximum number of boards reached"));

    store.clear_error();
    assert_eq!(store.snapshot().status.error(), None);
}

#[tokio::test]
async fn test_failed_delete_uses_fallback() {
    let service = TestService::start().await;
    service.respond_empty("DELETE", "/api/boards/b1", 500).await;

    let store = service.board_store();
    assert!(store.delete_board("b1").await.is_err());
    assert_eq!(store.snapshot().status.error(), Some("Failed to delete board"));
}

#[tokio::test]
async fn test_board_cap_is_reflected() {
    let service = TestService::start().await;
    let boards: Vec<_> = (0..7).map(|i| board_json(&format!("b{}", i), "Board")).collect();
    service.respond("GET", "/api/boards", 200, boards_json(&boards)).await;

    let store = service.board_store();
    assert!(store.can_create_board());
    store.fetch_boards().await.unwrap();
    assert!(!store.can_create_board());
}
