/**
 * Chat History Handlers
 *
 * Out-of-band REST access to rooms, used by clients to render the chat list
 * and to load a conversation before opening the realtime connection.
 *
 * - `GET /api/chats/user/{username}` - rooms of a participant, most recent first
 * - `GET /api/chats/{chatKey}` - one room by canonical key (`alice-bob`)
 *
 * Identifiers may contain `-`, so a key such as `a-b-c` can name more than
 * one pair. `get_chat` tries every split in order and returns the first room
 * that exists.
 */

use axum::{
    extract::{Path, State},
    Json,
};

use crate::backend::chat::store::SharedRoomStore;
use crate::backend::error::BackendError;
use crate::shared::error::ChatError;
use crate::shared::messaging::{Room, RoomKey};

/// Handle GET /api/chats/user/{username}
pub async fn list_user_chats(
    State(store): State<SharedRoomStore>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Room>>, BackendError> {
    if username.trim().is_empty() {
        return Err(ChatError::invalid_participants("username must not be empty").into());
    }

    let rooms = store.list_by_participant(&username).await?;
    tracing::debug!("[Http] Listed {} room(s) for {}", rooms.len(), username);
    Ok(Json(rooms))
}

/// Handle GET /api/chats/{chatKey}
///
/// # Errors
///
/// * `400 Bad Request` - No split of the key gives two distinct identifiers
/// * `404 Not Found` - No room exists for any split
pub async fn get_chat(
    State(store): State<SharedRoomStore>,
    Path(chat_key): Path<String>,
) -> Result<Json<Room>, BackendError> {
    let candidates = RoomKey::candidates(&chat_key);
    if candidates.is_empty() {
        return Err(ChatError::invalid_participants(format!(
            "'{}' is not a canonical room key",
            chat_key
        ))
        .into());
    }

    for key in &candidates {
        if let Some(room) = store.find_by_key(key).await? {
            return Ok(Json(room));
        }
    }
    Err(ChatError::room_not_found(&chat_key).into())
}
