//! Connection registry integration tests

use tokio::sync::mpsc::unbounded_channel;
use uuid::Uuid;

use pairchat::backend::realtime::ConnectionRegistry;
use pairchat::shared::event::ServerEvent;

#[test]
fn test_rebinding_moves_between_identity_groups() {
    let registry = ConnectionRegistry::new();
    let (tx, mut rx) = unbounded_channel();
    let conn = registry.register(tx);

    registry.bind(conn, "alice").unwrap();
    registry.bind(conn, "bob").unwrap();

    assert_eq!(registry.broadcast_to_identity("alice", ServerEvent::UpdateChatList), 0);
    assert_eq!(registry.broadcast_to_identity("bob", ServerEvent::UpdateChatList), 1);
    assert_eq!(rx.try_recv().unwrap(), ServerEvent::UpdateChatList);
}

#[test]
fn test_dropped_receiver_does_not_block_others() {
    let registry = ConnectionRegistry::new();
    let (tx_gone, rx_gone) = unbounded_channel();
    let (tx_live, mut rx_live) = unbounded_channel();
    let gone = registry.register(tx_gone);
    let live = registry.register(tx_live);
    registry.bind(gone, "alice").unwrap();
    registry.bind(live, "alice").unwrap();
    drop(rx_gone);

    assert_eq!(registry.broadcast_to_identity("alice", ServerEvent::UpdateChatList), 1);
    assert_eq!(rx_live.try_recv().unwrap(), ServerEvent::UpdateChatList);
}

#[test]
fn test_connection_in_many_rooms() {
    let registry = ConnectionRegistry::new();
    let (tx, _rx) = unbounded_channel();
    let conn = registry.register(tx);
    let rooms: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();

    for room in &rooms {
        assert!(registry.join_room_group(conn, *room));
    }
    for room in &rooms {
        assert_eq!(registry.room_group_size(*room), 1);
    }

    registry.deregister(conn);
    for room in &rooms {
        assert_eq!(registry.room_group_size(*room), 0);
    }
    assert!(!registry.join_room_group(conn, rooms[0]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration() {
    let registry = ConnectionRegistry::new();

    let mut tasks = Vec::new();
    for i in 0..32 {
        let registry = registry.clone();
        tasks.push(tokio::spawn(async move {
            let (tx, rx) = unbounded_channel();
            let conn = registry.register(tx);
            let identity = if i % 2 == 0 { "alice" } else { "bob" };
            registry.bind(conn, identity).unwrap();
            (conn, rx)
        }));
    }

    let mut connections = Vec::new();
    for task in tasks {
        connections.push(task.await.unwrap());
    }

    assert_eq!(registry.connection_count(), 32);
    assert_eq!(registry.identity_connection_count("alice"), 16);
    assert_eq!(registry.identity_connection_count("bob"), 16);

    for (conn, _rx) in &connections {
        registry.deregister(*conn);
    }
    assert_eq!(registry.connection_count(), 0);
    assert_eq!(registry.identity_connection_count("alice"), 0);
}
