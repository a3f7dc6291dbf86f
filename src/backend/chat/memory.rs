/**
 * In-Memory Room Store
 *
 * Keeps every room in a single `RwLock`-protected map. All mutations take
 * the write lock for their whole duration, which makes find-or-create and
 * append atomic without any further coordination.
 *
 * Used when `DATABASE_URL` is not set and throughout the test suite.
 */

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::chat::store::RoomStore;
use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Room, RoomId, RoomKey};

#[derive(Debug, Default)]
struct Rooms {
    by_id: HashMap<RoomId, Room>,
    by_key: HashMap<RoomKey, RoomId>,
}

/// Room store backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryRoomStore {
    rooms: Arc<RwLock<Rooms>>,
}

impl MemoryRoomStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rooms currently stored
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.by_id.len()
    }
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn find_or_create(&self, key: &RoomKey) -> Result<Room, ChatError> {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.by_key.get(key).and_then(|id| rooms.by_id.get(id)) {
            return Ok(room.clone());
        }

        let room = Room::new(Uuid::new_v4(), key, Utc::now());
        rooms.by_key.insert(key.clone(), room.id);
        rooms.by_id.insert(room.id, room.clone());
        tracing::debug!("[Store] Created room {} for {}", room.id, room.chat_id);

        Ok(room)
    }

    async fn append_message(&self, room_id: RoomId, message: ChatMessage) -> Result<Room, ChatError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .by_id
            .get_mut(&room_id)
            .ok_or_else(|| ChatError::room_not_found(room_id))?;

        room.messages.push(message);
        room.updated_at = Utc::now();

        Ok(room.clone())
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<bool, ChatError> {
        let mut rooms = self.rooms.write().await;
        match rooms.by_id.remove(&room_id) {
            Some(room) => {
                rooms.by_key.retain(|_, id| *id != room_id);
                tracing::debug!("[Store] Deleted room {} ({})", room_id, room.chat_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_by_participant(&self, identity: &str) -> Result<Vec<Room>, ChatError> {
        let rooms = self.rooms.read().await;
        let mut found: Vec<Room> = rooms
            .by_id
            .values()
            .filter(|room| room.has_participant(identity))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(found)
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> Result<Option<Room>, ChatError> {
        Ok(self.rooms.read().await.by_id.get(&room_id).cloned())
    }

    async fn find_by_key(&self, key: &RoomKey) -> Result<Option<Room>, ChatError> {
        let rooms = self.rooms.read().await;
        Ok(rooms
            .by_key
            .get(key)
            .and_then(|id| rooms.by_id.get(id))
            .cloned())
    }
}
