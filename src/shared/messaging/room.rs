//! Room Data Structure
//!
//! A room is the persisted chat between exactly two identities. Its `id` is
//! assigned by the store and is what clients address in realtime events; its
//! `chat_id` is the canonical participant key and is unique across the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::ChatMessage;
use super::room_key::RoomKey;

/// Store-assigned room identifier
pub type RoomId = Uuid;

/// A chat room between two participants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Store-assigned identifier
    pub id: RoomId,
    /// Canonical participant key (`alice-bob`)
    pub chat_id: String,
    /// Both participants, sorted
    pub participants: Vec<String>,
    /// Messages in append order
    pub messages: Vec<ChatMessage>,
    /// Set once when the room is materialized
    pub created_at: DateTime<Utc>,
    /// Refreshed on every append
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Create an empty room for `key`
    pub fn new(id: RoomId, key: &RoomKey, now: DateTime<Utc>) -> Self {
        Self {
            id,
            chat_id: key.to_string(),
            participants: key.participants().to_vec(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if an identity is a participant
    pub fn has_participant(&self, identity: &str) -> bool {
        self.participants.iter().any(|p| p == identity)
    }
}
