//! Pairchat - Main Library
//!
//! Pairchat is the realtime direct-message core of a blog/community site.
//! Two users converge on exactly one chat room, messages are persisted in
//! order, and every event is fanned out live over a WebSocket connection.
//!
//! # Module Structure
//!
//! - **`shared`** - Types used by every layer
//!   - Room keys, rooms, messages, notifications
//!   - Client and server wire events
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code
//!   - Room stores (in-memory and PostgreSQL)
//!   - Connection registry and notification bridge
//!   - Per-connection chat session protocol
//!   - Axum router, WebSocket endpoint and REST history routes
//!
//! # Usage
//!
//! ```rust,no_run
//! use pairchat::backend::server::init::create_app;
//! use pairchat::shared::ServerConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - The connection registry is an `Arc<RwLock<..>>` handle, cloned per connection
//! - Room stores are `Arc<dyn RoomStore>` and guarantee atomic appends themselves
//! - Outbound frames go through one unbounded `mpsc` queue per connection
//!
//! # Error Handling
//!
//! - `shared::error::ChatError` for domain and protocol failures
//! - `backend::error::BackendError` for HTTP responses

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
