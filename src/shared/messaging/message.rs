//! Chat Message Data Structure
//!
//! Represents one message inside a room. Messages are immutable once appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message in a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Identity of the participant who sent the message
    pub sender: String,
    /// Opaque text payload
    pub content: String,
    /// Logical send time
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a message, stamping it with the current time unless the caller
    /// supplied one
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            timestamp: timestamp.unwrap_or_else(Utc::now),
        }
    }
}
