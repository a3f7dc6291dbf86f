//! Backend Module
//!
//! This module contains all server-side code of the chat service: an Axum
//! HTTP server with a WebSocket endpoint for the realtime protocol and a
//! small REST surface for history.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`chat`** - Room stores, chat session protocol, WebSocket and REST handlers
//! - **`realtime`** - Connection registry and notification bridge
//! - **`error`** - HTTP error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── chat/           - Stores, session protocol, handlers
//! ├── realtime/       - Registry and notifications
//! └── error/          - Error types
//! ```
//!
//! # Concurrency
//!
//! - Each connection processes its own events strictly in order
//! - Connections interleave freely on the multi-threaded Tokio runtime
//! - Store calls are the only suspension points touching shared state
//! - The registry lock is never held across an `.await`

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Chat-related backend functionality
pub mod chat;

/// Real-time delivery
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use chat::{ChatSession, MemoryRoomStore, PgRoomStore, RoomStore, SharedRoomStore};
pub use error::BackendError;
pub use realtime::{ConnectionRegistry, NotificationBridge};
pub use server::create_app;
