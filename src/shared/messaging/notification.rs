//! Notification Data Structure
//!
//! Post and comment services raise notifications (someone liked or commented
//! on your post). The chat core only forwards them live; it keeps no inbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What triggered a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Someone commented on the recipient's post
    Comment,
    /// Someone liked the recipient's post
    Like,
}

/// A notification addressed to one identity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identity that receives the notification
    pub recipient: String,
    /// Identity that caused it
    pub sender: String,
    /// Post the notification refers to
    pub post_id: String,
    /// Comment or like
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Whether the recipient has seen it
    pub is_read: bool,
    /// When it was raised
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification
    pub fn new(
        recipient: impl Into<String>,
        sender: impl Into<String>,
        post_id: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            sender: sender.into(),
            post_id: post_id.into(),
            kind,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// A user acting on their own post gets no notification
    pub fn is_self_notification(&self) -> bool {
        self.recipient == self.sender
    }
}
