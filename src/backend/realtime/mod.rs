//! Real-time Delivery Module
//!
//! This module owns everything that pushes events to live connections.
//!
//! # Architecture
//!
//! The realtime module is organized into focused submodules:
//!
//! - **`registry`** - Connections, identity groups and room groups
//! - **`notify`** - List-refresh signals and post/comment notifications
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── registry.rs     - ConnectionRegistry
//! └── notify.rs       - NotificationBridge
//! ```
//!
//! # Groups
//!
//! - **Identity group**: every connection bound to one identity. Used for
//!   personal signals (`chat_request`, `update_chat_list`, `notification`).
//! - **Room group**: every connection that joined one room. Used for live
//!   message delivery (`receive_message`, `chat_deleted`).
//!
//! Both kinds of group may be empty; broadcasting to an empty group is a no-op.

/// Connection registry
pub mod registry;

/// Notification bridge
pub mod notify;

// Re-export commonly used types
pub use notify::NotificationBridge;
pub use registry::{ConnectionId, ConnectionRegistry, EventSender};
