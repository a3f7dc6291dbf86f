/**
 * Backend Error Types
 *
 * This module defines the errors returned by HTTP handlers. They wrap the
 * chat core's `ChatError` and know which HTTP status each failure maps to.
 *
 * # Status Code Mapping
 *
 * | Error                               | Status |
 * |-------------------------------------|--------|
 * | `InvalidParticipants`, `ProtocolError` | 400 |
 * | `Forbidden`                         | 403    |
 * | `RoomNotFound`                      | 404    |
 * | `StoreError`                        | 500    |
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::ChatError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pairchat::backend::error::BackendError;
/// use pairchat::shared::error::ChatError;
/// use axum::http::StatusCode;
///
/// let err: BackendError = ChatError::room_not_found("alice-bob").into();
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from the chat core
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl BackendError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Chat(err) => match err {
                ChatError::InvalidParticipants { .. } => StatusCode::BAD_REQUEST,
                ChatError::ProtocolError { .. } => StatusCode::BAD_REQUEST,
                ChatError::Forbidden { .. } => StatusCode::FORBIDDEN,
                ChatError::RoomNotFound { .. } => StatusCode::NOT_FOUND,
                ChatError::StoreError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        match self {
            Self::Chat(err) => err.to_string(),
        }
    }
}
