//! Room store integration tests
//!
//! The memory store runs everywhere. The PostgreSQL store tests are ignored
//! by default; run them with `DATABASE_URL` pointing at a scratch database:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/pairchat_test cargo test -- --ignored
//! ```

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use uuid::Uuid;

use pairchat::backend::chat::db::PgRoomStore;
use pairchat::backend::chat::memory::MemoryRoomStore;
use pairchat::backend::chat::store::SharedRoomStore;
use pairchat::backend::server::config::load_database;
use pairchat::shared::error::ChatError;
use pairchat::shared::messaging::{ChatMessage, RoomKey};

fn key(a: &str, b: &str) -> RoomKey {
    RoomKey::new(a, b).unwrap()
}

/// Unique participant names so runs against a shared database do not collide
fn unique(name: &str) -> String {
    format!("{}{}", name, Uuid::new_v4().simple())
}

async fn concurrent_find_or_create_converges(store: SharedRoomStore) {
    let a = unique("alice");
    let b = unique("bob");

    let mut tasks = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        let (a, b) = (a.clone(), b.clone());
        tasks.push(tokio::spawn(async move {
            // Alternate argument order to exercise the canonical key
            let key = if i % 2 == 0 { key(&a, &b) } else { key(&b, &a) };
            store.find_or_create(&key).await
        }));
    }

    let mut ids = Vec::new();
    for task in tasks {
        ids.push(assert_ok!(task.await.unwrap()).id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(store.list_by_participant(&a).await.unwrap().len(), 1);
}

async fn concurrent_appends_are_not_lost(store: SharedRoomStore) {
    let room = store
        .find_or_create(&key(&unique("alice"), &unique("bob")))
        .await
        .unwrap();

    let room_id = room.id;

    let mut tasks = Vec::new();
    for i in 0..40 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            store
                .append_message(room_id, ChatMessage::new("alice", format!("m{}", i), None))
                .await
        }));
    }
    for task in tasks {
        assert_ok!(task.await.unwrap());
    }

    let stored = store.find_by_room_id(room.id).await.unwrap().unwrap();
    assert_eq!(stored.messages.len(), 40);
    assert!(stored.updated_at >= stored.created_at);
}

async fn append_after_delete_fails(store: SharedRoomStore) {
    let room = store
        .find_or_create(&key(&unique("alice"), &unique("bob")))
        .await
        .unwrap();
    assert!(store.delete_room(room.id).await.unwrap());

    let result = store
        .append_message(room.id, ChatMessage::new("alice", "late", None))
        .await;
    assert_err!(result, ChatError::RoomNotFound { .. });
    assert!(!store.delete_room(room.id).await.unwrap());
}

async fn messages_round_trip_in_order(store: SharedRoomStore) {
    let a = unique("alice");
    let b = unique("bob");
    let room = store.find_or_create(&key(&a, &b)).await.unwrap();
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();

    store
        .append_message(room.id, ChatMessage::new(a.clone(), "first", Some(at)))
        .await
        .unwrap();
    let updated = store
        .append_message(room.id, ChatMessage::new(b.clone(), "second", None))
        .await
        .unwrap();

    assert_eq!(updated.messages[0].timestamp, at);
    let by_key = store.find_by_key(&key(&b, &a)).await.unwrap().unwrap();
    assert_eq!(by_key.messages, updated.messages);
    assert_eq!(by_key.participants.len(), 2);
}

async fn separator_in_names_keeps_rooms_apart(store: SharedRoomStore) {
    // ("x-y", "z") and ("x", "y-z") print the same chat id
    let suffix = Uuid::new_v4().simple().to_string();
    let x = format!("a{}", suffix);
    let left = store.find_or_create(&key(&format!("{}-y", x), "z")).await.unwrap();
    let right = store.find_or_create(&key(&x, "y-z")).await.unwrap();

    assert_eq!(left.chat_id, right.chat_id);
    assert_ne!(left.id, right.id);

    store
        .append_message(right.id, ChatMessage::new("y-z", "hi", None))
        .await
        .unwrap();
    let left = store.find_by_room_id(left.id).await.unwrap().unwrap();
    assert!(left.messages.is_empty());

    store.delete_room(left.id).await.unwrap();
    store.delete_room(right.id).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_concurrent_find_or_create() {
    concurrent_find_or_create_converges(Arc::new(MemoryRoomStore::new())).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_memory_concurrent_appends() {
    concurrent_appends_are_not_lost(Arc::new(MemoryRoomStore::new())).await;
}

#[tokio::test]
async fn test_memory_append_after_delete() {
    append_after_delete_fails(Arc::new(MemoryRoomStore::new())).await;
}

#[tokio::test]
async fn test_memory_messages_round_trip() {
    messages_round_trip_in_order(Arc::new(MemoryRoomStore::new())).await;
}

#[tokio::test]
async fn test_memory_separator_in_names() {
    separator_in_names_keeps_rooms_apart(Arc::new(MemoryRoomStore::new())).await;
}

async fn pg_store() -> SharedRoomStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for PostgreSQL tests");
    let pool = load_database(Some(&url), 5)
        .await
        .expect("Failed to connect to the test database");
    Arc::new(PgRoomStore::new(pool))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_pg_concurrent_find_or_create() {
    concurrent_find_or_create_converges(pg_store().await).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore]
async fn test_pg_concurrent_appends() {
    concurrent_appends_are_not_lost(pg_store().await).await;
}

#[tokio::test]
#[ignore]
async fn test_pg_append_after_delete() {
    append_after_delete_fails(pg_store().await).await;
}

#[tokio::test]
#[ignore]
async fn test_pg_messages_round_trip() {
    messages_round_trip_in_order(pg_store().await).await;
}

#[tokio::test]
#[ignore]
async fn test_pg_separator_in_names() {
    separator_in_names_keeps_rooms_apart(pg_store().await).await;
}
