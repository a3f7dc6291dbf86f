//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, CORS and route assembly
//! - **`chat_routes`** - Realtime endpoint and chat history routes
//! - **`api_routes`** - Health check and notification hook
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! ├── chat_routes.rs  - Chat routes
//! └── api_routes.rs   - Service routes
//! ```
//!
//! # Routes
//!
//! - `GET /ws` - WebSocket upgrade for the realtime chat protocol
//! - `GET /api/chats/user/{username}` - Rooms of a participant
//! - `GET /api/chats/{chatKey}` - One room by canonical key
//! - `GET /api/health` - Liveness and connection count
//! - `POST /api/notifications` - Push a like/comment notification

/// Main router creation
pub mod router;

/// Chat-related routes
pub mod chat_routes;

/// Service routes
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
