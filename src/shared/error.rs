//! Shared Error Types
//!
//! This module defines the error taxonomy of the chat core. Every failure a
//! room operation or a session event can produce is one of these variants.
//!
//! # Error Categories
//!
//! - `InvalidParticipants` - Bad pair cardinality, equality or empty identifiers
//! - `RoomNotFound` - Referenced room is missing (usually a delete race)
//! - `StoreError` - The persistence layer failed
//! - `ProtocolError` - Malformed event payload
//! - `Forbidden` - The connection's bound identity may not perform the event
//!
//! # Usage
//!
//! ```rust
//! use pairchat::shared::error::ChatError;
//!
//! let error = ChatError::invalid_participants("participants must be distinct");
//! assert!(error.to_string().contains("distinct"));
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and `Clone`, so a single failure can be
//! logged and forwarded to a client without re-creating it.
use thiserror::Error;

/// Errors produced by the chat core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// The participant pair is not exactly two distinct, non-empty identifiers
    #[error("Invalid participants: {reason}")]
    InvalidParticipants {
        /// Why the pair was rejected
        reason: String,
    },

    /// The referenced room does not exist
    #[error("Room not found: {room}")]
    RoomNotFound {
        /// Room id or canonical key that was looked up
        room: String,
    },

    /// The underlying store failed
    #[error("Store error: {message}")]
    StoreError {
        /// Human-readable error message
        message: String,
    },

    /// The event payload is malformed
    #[error("Protocol error: {message}")]
    ProtocolError {
        /// Human-readable error message
        message: String,
    },

    /// The connection's identity does not allow the event
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },
}

impl ChatError {
    /// Create a new invalid participants error
    pub fn invalid_participants(reason: impl Into<String>) -> Self {
        Self::InvalidParticipants {
            reason: reason.into(),
        }
    }

    /// Create a new room not found error
    pub fn room_not_found(room: impl ToString) -> Self {
        Self::RoomNotFound {
            room: room.to_string(),
        }
    }

    /// Create a new store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    /// Create a new protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::protocol(format!("JSON error: {}", err))
    }
}
