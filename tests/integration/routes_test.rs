//! HTTP route integration tests
//!
//! Drives the router with `tower::ServiceExt::oneshot`, no socket involved.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use pairchat::shared::event::ServerEvent;
use pairchat::shared::messaging::{ChatMessage, RoomKey};

use crate::common::*;

async fn get_json(app: &TestApp, uri: &str) -> (StatusCode, Value) {
    let response = app
        .router()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let _alice = app.join("alice").await;

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok", "connections": 1}));
}

#[tokio::test]
async fn test_list_user_chats_most_recent_first() {
    let app = TestApp::new();
    let store = &app.state.store;
    let with_bob = store.find_or_create(&RoomKey::new("alice", "bob").unwrap()).await.unwrap();
    store.find_or_create(&RoomKey::new("alice", "carol").unwrap()).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    store
        .append_message(with_bob.id, ChatMessage::new("bob", "latest", None))
        .await
        .unwrap();

    let (status, body) = get_json(&app, "/api/chats/user/alice").await;
    assert_eq!(status, StatusCode::OK);

    let chat_ids: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|room| room["chatId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(chat_ids, vec!["alice-bob", "alice-carol"]);
    assert_eq!(body[0]["messages"][0]["content"], "latest");
}

#[tokio::test]
async fn test_list_for_unknown_user_is_empty() {
    let app = TestApp::new();
    let (status, body) = get_json(&app, "/api/chats/user/nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_chat_by_key() {
    let app = TestApp::new();
    let room = app
        .state
        .store
        .find_or_create(&RoomKey::new("bob", "alice").unwrap())
        .await
        .unwrap();

    let (status, body) = get_json(&app, "/api/chats/alice-bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], room.id.to_string());
    assert_eq!(body["participants"], serde_json::json!(["alice", "bob"]));
}

#[tokio::test]
async fn test_get_chat_with_separator_in_names() {
    let app = TestApp::new();
    let store = &app.state.store;
    let only = store
        .find_or_create(&RoomKey::new("mary-jane", "bob").unwrap())
        .await
        .unwrap();

    let (status, body) = get_json(&app, "/api/chats/bob-mary-jane").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], only.id.to_string());
    assert_eq!(body["participants"], serde_json::json!(["bob", "mary-jane"]));

    // Both pairs print as "a-b-c"; the first split wins
    let first = store.find_or_create(&RoomKey::new("a", "b-c").unwrap()).await.unwrap();
    store.find_or_create(&RoomKey::new("a-b", "c").unwrap()).await.unwrap();
    let (status, body) = get_json(&app, "/api/chats/a-b-c").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], first.id.to_string());
}

#[tokio::test]
async fn test_get_chat_errors() {
    let app = TestApp::new();

    let (status, body) = get_json(&app, "/api/chats/alice-bob").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_contains!(body["error"].as_str().unwrap(), "Room not found");

    let (status, body) = get_json(&app, "/api/chats/alice-alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = get_json(&app, "/api/chats/alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_publish_notification() {
    let app = TestApp::new();
    let mut alice = app.join("alice").await;

    let body = serde_json::json!({
        "recipient": "alice",
        "sender": "bob",
        "postId": "post-42",
        "type": "comment",
        "isRead": false,
        "createdAt": "2024-05-01T12:00:00Z"
    });
    let response = app
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notifications")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let reply: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reply["delivered"], 1);

    match &alice.drain()[..] {
        [ServerEvent::Notification(notification)] => {
            assert_eq!(notification.sender, "bob");
            assert_eq!(notification.post_id, "post-42");
        }
        other => panic!("Unexpected events: {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();
    let response = app
        .router()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_dev_origin() {
    let app = TestApp::new();
    let response = app
        .router()
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
}
