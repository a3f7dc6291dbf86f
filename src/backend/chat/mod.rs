//! Chat Backend Module
//!
//! This module contains all server-side chat functionality:
//! - Room persistence behind the `RoomStore` trait
//! - The per-connection realtime session protocol
//! - The WebSocket endpoint and the REST history handlers
//!
//! # Architecture
//!
//! - **`store`** - `RoomStore` trait and `SharedRoomStore` handle
//! - **`memory`** - In-process store, used without a database
//! - **`db`** - PostgreSQL store
//! - **`handlers`** - `ChatSession` and HTTP handlers
//! - **`ws`** - `GET /ws` upgrade and connection loop
//!
//! # Example
//!
//! ```rust,no_run
//! use pairchat::backend::chat::{MemoryRoomStore, RoomStore};
//! use pairchat::shared::messaging::{ChatMessage, RoomKey};
//!
//! # async fn example() -> Result<(), pairchat::shared::ChatError> {
//! let store = MemoryRoomStore::new();
//! let room = store.find_or_create(&RoomKey::new("alice", "bob")?).await?;
//! store.append_message(room.id, ChatMessage::new("alice", "hi", None)).await?;
//! # Ok(())
//! # }
//! ```

/// Room store trait
pub mod store;

/// In-memory room store
pub mod memory;

/// PostgreSQL room store
pub mod db;

/// Realtime session and HTTP handlers
pub mod handlers;

/// WebSocket endpoint
pub mod ws;

/// Re-export commonly used types
pub use db::PgRoomStore;
pub use handlers::ChatSession;
pub use memory::MemoryRoomStore;
pub use store::{RoomStore, SharedRoomStore};
pub use ws::handle_ws_upgrade;
