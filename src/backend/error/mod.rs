//! Backend Error Module
//!
//! This module defines the errors returned by HTTP handlers and their
//! conversion into HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and its status mapping
//! - **`conversion`** - `IntoResponse` implementation
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! Realtime handlers do not use this module: their failures become `error`
//! events on the originating connection (see `backend::chat::handlers`).

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
