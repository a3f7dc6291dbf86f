/**
 * Connection Registry
 *
 * This module tracks every live realtime connection together with:
 *
 * - the identity it is bound to (zero or one per connection, many
 *   connections per identity for multi-tab use)
 * - the room groups it has joined
 *
 * Each connection owns an unbounded `mpsc` queue; the registry only holds the
 * sending half. Delivery is best-effort: a queue whose receiver has gone
 * away simply drops the event.
 *
 * The registry is a cheap-to-clone handle over one `RwLock`. The lock is
 * never held across an `.await`, so callers may use it freely between store
 * calls.
 */

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::shared::error::ChatError;
use crate::shared::event::ServerEvent;
use crate::shared::messaging::RoomId;

/// Identifier of one live connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound queue of one connection
pub type EventSender = UnboundedSender<ServerEvent>;

struct Connection {
    sender: EventSender,
    identity: Option<String>,
    rooms: HashSet<RoomId>,
}

#[derive(Default)]
struct Inner {
    connections: HashMap<ConnectionId, Connection>,
    identities: HashMap<String, HashSet<ConnectionId>>,
    room_groups: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl Inner {
    fn detach_identity(&mut self, conn: ConnectionId, identity: &str) {
        if let Some(group) = self.identities.get_mut(identity) {
            group.remove(&conn);
            if group.is_empty() {
                self.identities.remove(identity);
            }
        }
    }

    fn detach_room(&mut self, conn: ConnectionId, room_id: RoomId) {
        if let Some(group) = self.room_groups.get_mut(&room_id) {
            group.remove(&conn);
            if group.is_empty() {
                self.room_groups.remove(&room_id);
            }
        }
    }

    fn deliver(&self, targets: impl IntoIterator<Item = ConnectionId>, event: &ServerEvent) -> usize {
        targets
            .into_iter()
            .filter_map(|conn| self.connections.get(&conn))
            .filter(|connection| connection.sender.send(event.clone()).is_ok())
            .count()
    }
}

/// Registry of live connections, identity groups and room groups
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // Poisoning leaves the maps structurally valid
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a new connection with its outbound queue
    pub fn register(&self, sender: EventSender) -> ConnectionId {
        let conn = ConnectionId::new();
        self.write().connections.insert(
            conn,
            Connection {
                sender,
                identity: None,
                rooms: HashSet::new(),
            },
        );
        tracing::debug!("[Registry] Registered connection {}", conn);
        conn
    }

    /// Remove a connection, its identity binding and every room membership
    ///
    /// Returns the identity the connection was bound to.
    pub fn deregister(&self, conn: ConnectionId) -> Option<String> {
        let mut inner = self.write();
        let connection = inner.connections.remove(&conn)?;

        if let Some(identity) = &connection.identity {
            inner.detach_identity(conn, identity);
        }
        for room_id in &connection.rooms {
            inner.detach_room(conn, *room_id);
        }

        tracing::debug!(
            "[Registry] Deregistered connection {} (identity: {:?}, rooms: {})",
            conn,
            connection.identity,
            connection.rooms.len()
        );
        connection.identity
    }

    /// Bind a connection to an identity, replacing any previous binding
    ///
    /// Returns the previous identity.
    pub fn bind(&self, conn: ConnectionId, identity: &str) -> Result<Option<String>, ChatError> {
        let mut inner = self.write();
        let connection = inner
            .connections
            .get_mut(&conn)
            .ok_or_else(|| ChatError::protocol(format!("unknown connection {}", conn)))?;
        let previous = connection.identity.replace(identity.to_string());

        if let Some(previous) = &previous {
            inner.detach_identity(conn, previous);
        }
        inner
            .identities
            .entry(identity.to_string())
            .or_default()
            .insert(conn);

        Ok(previous)
    }

    /// Drop a connection's identity binding; no-op when unbound
    pub fn unbind(&self, conn: ConnectionId) -> Option<String> {
        let mut inner = self.write();
        let identity = inner.connections.get_mut(&conn)?.identity.take()?;
        inner.detach_identity(conn, &identity);
        Some(identity)
    }

    /// Identity a connection is bound to
    pub fn identity_of(&self, conn: ConnectionId) -> Option<String> {
        self.read()
            .connections
            .get(&conn)
            .and_then(|connection| connection.identity.clone())
    }

    /// Send an event to one connection
    pub fn send_to(&self, conn: ConnectionId, event: ServerEvent) -> bool {
        self.read().deliver([conn], &event) == 1
    }

    /// Send an event to every connection bound to `identity`
    ///
    /// Returns how many connections received it; zero is not an error.
    pub fn broadcast_to_identity(&self, identity: &str, event: ServerEvent) -> usize {
        let inner = self.read();
        match inner.identities.get(identity) {
            Some(group) => inner.deliver(group.iter().copied(), &event),
            None => 0,
        }
    }

    /// Add a connection to a room group
    pub fn join_room_group(&self, conn: ConnectionId, room_id: RoomId) -> bool {
        let mut inner = self.write();
        match inner.connections.get_mut(&conn) {
            Some(connection) => {
                connection.rooms.insert(room_id);
                inner.room_groups.entry(room_id).or_default().insert(conn);
                true
            }
            None => false,
        }
    }

    /// Remove a connection from a room group
    pub fn leave_room_group(&self, conn: ConnectionId, room_id: RoomId) -> bool {
        let mut inner = self.write();
        let was_member = inner
            .connections
            .get_mut(&conn)
            .map(|connection| connection.rooms.remove(&room_id))
            .unwrap_or(false);
        inner.detach_room(conn, room_id);
        was_member
    }

    /// Send an event to every member of a room group
    pub fn broadcast_to_room(&self, room_id: RoomId, event: ServerEvent) -> usize {
        let inner = self.read();
        match inner.room_groups.get(&room_id) {
            Some(group) => inner.deliver(group.iter().copied(), &event),
            None => 0,
        }
    }

    /// Remove every member from a room group
    ///
    /// Returns how many connections were removed.
    pub fn clear_room_group(&self, room_id: RoomId) -> usize {
        let mut inner = self.write();
        let members = inner.room_groups.remove(&room_id).unwrap_or_default();
        for conn in &members {
            if let Some(connection) = inner.connections.get_mut(conn) {
                connection.rooms.remove(&room_id);
            }
        }
        members.len()
    }

    /// Number of live connections
    pub fn connection_count(&self) -> usize {
        self.read().connections.len()
    }

    /// Number of connections bound to `identity`
    pub fn identity_connection_count(&self, identity: &str) -> usize {
        self.read().identities.get(identity).map_or(0, HashSet::len)
    }

    /// Number of connections in a room group
    pub fn room_group_size(&self, room_id: RoomId) -> usize {
        self.read().room_groups.get(&room_id).map_or(0, HashSet::len)
    }
}
