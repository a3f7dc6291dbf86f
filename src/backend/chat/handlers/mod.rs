//! Chat Handlers Module
//!
//! This module contains the per-connection realtime protocol and the HTTP
//! handlers of the chat service.
//!
//! # Architecture
//!
//! - **`session`** - `ChatSession`: event dispatch, error boundary, identity binding
//! - **`rooms`** - `chat_request`, `join_chat`, `chat_accepted`, `leave_chat`, `delete_chat`
//! - **`messages`** - `send_message`
//! - **`history`** - REST room listing and lookup
//! - **`status`** - Health check and notification hook
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs          - Module exports and documentation
//! ├── session.rs      - ChatSession
//! ├── rooms.rs        - Room lifecycle events
//! ├── messages.rs     - Message events
//! ├── history.rs      - GET /api/chats/...
//! └── status.rs       - GET /api/health, POST /api/notifications
//! ```
//!
//! # Event Table
//!
//! | Client event     | Emits                                                         |
//! |------------------|---------------------------------------------------------------|
//! | `join`           | nothing                                                       |
//! | `leave`          | nothing                                                       |
//! | `chat_request`   | `chat_request` to receiver, `update_chat_list` to both, `chat_request_success` to requester |
//! | `join_chat`      | `previous_messages` to requester, `update_chat_list` to both  |
//! | `send_message`   | `receive_message` to room group, `update_chat_list` to both   |
//! | `chat_accepted`  | `chat_accepted` to sender, `update_chat_list` to both         |
//! | `leave_chat`     | nothing                                                       |
//! | `delete_chat`    | `chat_deleted` to room group, `update_chat_list` to both      |
//!
//! Any failure emits `error` to the originating connection only.

/// Per-connection session
pub mod session;

/// Room lifecycle events
pub mod rooms;

/// Message events
pub mod messages;

/// REST history handlers
pub mod history;

/// Health and notification handlers
pub mod status;

// Re-export commonly used handlers
pub use history::{get_chat, list_user_chats};
pub use messages::MAX_MESSAGE_LENGTH;
pub use session::ChatSession;
pub use status::{health, publish_notification};
