/**
 * Message Events
 *
 * `send_message` appends to the pair's room and fans the message out to the
 * room group. The append always completes before anything is broadcast, so
 * a receiver never sees a message the store does not have.
 */

use chrono::{DateTime, Utc};

use super::session::ChatSession;
use crate::shared::error::ChatError;
use crate::shared::event::ServerEvent;
use crate::shared::messaging::{ChatMessage, RoomKey};

/// Longest accepted message, in characters
pub const MAX_MESSAGE_LENGTH: usize = 10_000;

impl ChatSession {
    pub(super) async fn send_message(
        &self,
        participants: &[String],
        sender: &str,
        content: String,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<(), ChatError> {
        let key = RoomKey::from_participants(participants)?;

        if content.trim().is_empty() {
            return Err(ChatError::protocol("message content must not be empty"));
        }
        if content.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ChatError::protocol(format!(
                "message exceeds {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        self.require_identity(sender)?;
        if !key.contains(sender) {
            return Err(ChatError::forbidden(format!(
                "{} is not a participant of {}",
                sender, key
            )));
        }

        let room = self.store.find_or_create(&key).await?;
        let message = ChatMessage::new(sender, content, timestamp);
        let updated = self.store.append_message(room.id, message.clone()).await?;

        let delivered = self
            .registry
            .broadcast_to_room(updated.id, ServerEvent::ReceiveMessage(message));
        tracing::debug!(
            "[Chat] {} sent message #{} in room {} ({} delivered)",
            sender,
            updated.messages.len(),
            updated.id,
            delivered
        );

        self.notifications.refresh_chat_lists(key.participants());
        Ok(())
    }
}
