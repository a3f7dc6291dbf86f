//! Messaging Module
//!
//! This module contains the data structures of the direct chat system:
//!
//! - `RoomKey` - Canonical, order-independent key of a participant pair
//! - `Room` - A persisted two-party chat
//! - `ChatMessage` - A message in a room
//! - `Notification` - A post/comment notification pushed to a user
//!
//! # Usage
//!
//! ```rust
//! use pairchat::shared::messaging::{ChatMessage, Room, RoomKey};
//! ```

pub mod message;
pub mod notification;
pub mod room;
pub mod room_key;

// Re-export all types
pub use message::ChatMessage;
pub use notification::{Notification, NotificationKind};
pub use room::{Room, RoomId};
pub use room_key::{canonical_key, RoomKey, KEY_SEPARATOR};
