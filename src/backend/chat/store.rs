/**
 * Room Store
 *
 * This module defines the persistence seam of the chat core. A store owns
 * rooms and their message logs and guarantees two things on its own:
 *
 * - at most one room exists per canonical key, even when two callers race
 *   to create it
 * - appends to one room never lose each other, whatever the interleaving
 *
 * Callers never hold a lock across a store call; atomicity lives here.
 *
 * # Implementations
 *
 * - `MemoryRoomStore` (`backend::chat::memory`) - in-process, used without a database
 * - `PgRoomStore` (`backend::chat::db`) - PostgreSQL through `sqlx`
 */

use std::sync::Arc;

use async_trait::async_trait;

use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Room, RoomId, RoomKey};

/// Shared handle to the active store
pub type SharedRoomStore = Arc<dyn RoomStore>;

/// Storage of two-party chat rooms
#[async_trait]
pub trait RoomStore: Send + Sync {
    /// Return the room for `key`, creating an empty one if none exists
    async fn find_or_create(&self, key: &RoomKey) -> Result<Room, ChatError>;

    /// Append a message and refresh `updated_at`
    ///
    /// Fails with `RoomNotFound` when the room has been deleted.
    async fn append_message(&self, room_id: RoomId, message: ChatMessage) -> Result<Room, ChatError>;

    /// Delete a room and its messages; `false` when nothing was deleted
    async fn delete_room(&self, room_id: RoomId) -> Result<bool, ChatError>;

    /// Rooms containing `identity`, most recently updated first
    async fn list_by_participant(&self, identity: &str) -> Result<Vec<Room>, ChatError>;

    /// Look up a room by id
    async fn find_by_room_id(&self, room_id: RoomId) -> Result<Option<Room>, ChatError>;

    /// Look up a room by canonical key without creating it
    async fn find_by_key(&self, key: &RoomKey) -> Result<Option<Room>, ChatError>;
}
