/**
 * Realtime Chat Events
 *
 * This module defines the named events exchanged over a chat connection.
 * Every frame is a JSON object `{"event": "<name>", "data": <payload>}`;
 * payload-less events omit `data`.
 *
 * `ClientEvent` is the closed set of inputs a session accepts and
 * `ServerEvent` is everything the server can push back.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Notification, Room, RoomId};

/// Event sent by a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Bind the connection to an identity
    Join { username: String },
    /// Drop the connection's identity binding
    Leave { username: String },
    /// Ask `receiver` to start chatting
    ChatRequest { sender: String, receiver: String },
    /// Open a room and fetch its history
    JoinChat { participants: Vec<String> },
    /// Append a message to the pair's room
    SendMessage {
        participants: Vec<String>,
        sender: String,
        content: String,
        #[serde(default)]
        timestamp: Option<DateTime<Utc>>,
    },
    /// Receiver accepts a chat request
    ChatAccepted {
        sender: String,
        receiver: String,
        room_id: RoomId,
    },
    /// Stop receiving a room's live messages
    LeaveChat { participants: Vec<String> },
    /// Delete a room for both participants
    DeleteChat {
        /// Sent by clients but not trusted; the stored participants decide
        #[serde(default)]
        participants: Vec<String>,
        room_id: RoomId,
    },
}

impl ClientEvent {
    /// Decode a text frame
    pub fn decode(text: &str) -> Result<Self, ChatError> {
        serde_json::from_str(text)
            .map_err(|e| ChatError::protocol(format!("malformed event: {}", e)))
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::Leave { .. } => "leave",
            Self::ChatRequest { .. } => "chat_request",
            Self::JoinChat { .. } => "join_chat",
            Self::SendMessage { .. } => "send_message",
            Self::ChatAccepted { .. } => "chat_accepted",
            Self::LeaveChat { .. } => "leave_chat",
            Self::DeleteChat { .. } => "delete_chat",
        }
    }
}

/// Event pushed by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Someone wants to chat with the recipient
    ChatRequest {
        sender: String,
        room_id: RoomId,
        timestamp: DateTime<Utc>,
    },
    /// The recipient's room list changed and should be re-fetched
    UpdateChatList,
    /// The requester's chat request went through
    ChatRequestSuccess {
        room_id: RoomId,
        receiver: String,
        chat: Room,
    },
    /// Full history of a room, oldest first
    PreviousMessages(Vec<ChatMessage>),
    /// A message was appended to a joined room
    ReceiveMessage(ChatMessage),
    /// The receiver accepted the sender's chat request
    ChatAccepted {
        sender: String,
        receiver: String,
        room_id: RoomId,
    },
    /// A joined room was deleted
    ChatDeleted { room_id: RoomId },
    /// A post or comment notification
    Notification(Notification),
    /// An event from this connection failed
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

impl ServerEvent {
    /// Error event carrying a short message and the failure detail
    pub fn failure(message: impl Into<String>, detail: &ChatError) -> Self {
        Self::Error {
            message: message.into(),
            error: Some(detail.to_string()),
        }
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::ChatRequest { .. } => "chat_request",
            Self::UpdateChatList => "update_chat_list",
            Self::ChatRequestSuccess { .. } => "chat_request_success",
            Self::PreviousMessages(_) => "previous_messages",
            Self::ReceiveMessage(_) => "receive_message",
            Self::ChatAccepted { .. } => "chat_accepted",
            Self::ChatDeleted { .. } => "chat_deleted",
            Self::Notification(_) => "notification",
            Self::Error { .. } => "error",
        }
    }
}
