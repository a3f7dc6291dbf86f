//! Shared Module
//!
//! This module contains the types shared by every layer of the chat server:
//! the domain model, the realtime wire events, errors and configuration.
//!
//! # Overview
//!
//! Nothing in here touches the network or the database. All types are plain
//! data designed for serialization and can be used from handlers, stores and
//! tests alike.

/// Realtime wire events
pub mod event;

/// Shared error types
pub mod error;

/// Server configuration
pub mod config;

/// Rooms, messages and notifications
pub mod messaging;

/// Re-export commonly used types for convenience
pub use config::{ConfigError, ServerConfig, ServerConfigBuilder};
pub use error::ChatError;
pub use event::{ClientEvent, ServerEvent};
pub use messaging::{canonical_key, ChatMessage, Notification, NotificationKind, Room, RoomId, RoomKey};
