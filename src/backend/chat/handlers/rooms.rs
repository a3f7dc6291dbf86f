/**
 * Room Lifecycle Events
 *
 * `chat_request`, `join_chat`, `chat_accepted`, `leave_chat` and
 * `delete_chat`. Each handler resolves the room through the store first and
 * only then touches room groups or broadcasts, so a failed store call never
 * leaves a half-applied membership behind.
 */

use chrono::Utc;

use super::session::ChatSession;
use crate::shared::error::ChatError;
use crate::shared::event::ServerEvent;
use crate::shared::messaging::{RoomId, RoomKey};

impl ChatSession {
    pub(super) async fn chat_request(&self, sender: &str, receiver: &str) -> Result<(), ChatError> {
        let key = RoomKey::new(sender, receiver)?;
        self.require_identity(sender)?;

        let room = self.store.find_or_create(&key).await?;
        self.registry.join_room_group(self.connection_id, room.id);

        let delivered = self.registry.broadcast_to_identity(
            receiver,
            ServerEvent::ChatRequest {
                sender: sender.to_string(),
                room_id: room.id,
                timestamp: Utc::now(),
            },
        );
        tracing::info!(
            "[Chat] {} requested chat with {} in room {} ({} connection(s) notified)",
            sender,
            receiver,
            room.id,
            delivered
        );

        self.notifications.refresh_chat_lists(key.participants());
        self.registry.send_to(
            self.connection_id,
            ServerEvent::ChatRequestSuccess {
                room_id: room.id,
                receiver: receiver.to_string(),
                chat: room,
            },
        );
        Ok(())
    }

    pub(super) async fn join_chat(&self, participants: &[String]) -> Result<(), ChatError> {
        let key = RoomKey::from_participants(participants)?;
        let identity = self.bound_identity()?;
        if !key.contains(&identity) {
            return Err(ChatError::forbidden(format!(
                "{} is not a participant of {}",
                identity, key
            )));
        }

        let room = self.store.find_or_create(&key).await?;
        self.registry.join_room_group(self.connection_id, room.id);
        tracing::debug!(
            "[Chat] {} joined room {} with {} message(s)",
            identity,
            room.id,
            room.messages.len()
        );

        self.registry
            .send_to(self.connection_id, ServerEvent::PreviousMessages(room.messages));
        self.notifications.refresh_chat_lists(&room.participants);
        Ok(())
    }

    pub(super) async fn chat_accepted(
        &self,
        sender: &str,
        receiver: &str,
        room_id: RoomId,
    ) -> Result<(), ChatError> {
        let room = self
            .store
            .find_by_room_id(room_id)
            .await?
            .ok_or_else(|| ChatError::room_not_found(room_id))?;
        self.require_identity(receiver)?;
        if !room.has_participant(sender) || !room.has_participant(receiver) {
            return Err(ChatError::forbidden(format!(
                "{} and {} are not the participants of room {}",
                sender, receiver, room_id
            )));
        }

        self.registry.join_room_group(self.connection_id, room.id);
        self.registry.broadcast_to_identity(
            sender,
            ServerEvent::ChatAccepted {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                room_id,
            },
        );
        tracing::info!("[Chat] {} accepted chat from {} in room {}", receiver, sender, room_id);

        self.notifications.refresh_chat_lists(&room.participants);
        Ok(())
    }

    pub(super) async fn leave_chat(&self, participants: &[String]) -> Result<(), ChatError> {
        let key = RoomKey::from_participants(participants)?;
        let room = self
            .store
            .find_by_key(&key)
            .await?
            .ok_or_else(|| ChatError::room_not_found(&key))?;

        if self.registry.leave_room_group(self.connection_id, room.id) {
            tracing::debug!("[Chat] Connection {} left room {}", self.connection_id, room.id);
        }
        Ok(())
    }

    pub(super) async fn delete_chat(&self, room_id: RoomId) -> Result<(), ChatError> {
        let room = self
            .store
            .find_by_room_id(room_id)
            .await?
            .ok_or_else(|| ChatError::room_not_found(room_id))?;
        let identity = self.bound_identity()?;
        if !room.has_participant(&identity) {
            return Err(ChatError::forbidden(format!(
                "{} is not a participant of room {}",
                identity, room_id
            )));
        }

        // Another participant may have deleted it since the lookup
        if !self.store.delete_room(room_id).await? {
            return Err(ChatError::room_not_found(room_id));
        }

        let notified = self
            .registry
            .broadcast_to_room(room_id, ServerEvent::ChatDeleted { room_id });
        let removed = self.registry.clear_room_group(room_id);
        tracing::info!(
            "[Chat] {} deleted room {} ({} notified, {} removed from group)",
            identity,
            room_id,
            notified,
            removed
        );

        self.notifications.refresh_chat_lists(&room.participants);
        Ok(())
    }
}
