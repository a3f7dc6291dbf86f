/**
 * Chat Routes
 *
 * - `GET /ws` - WebSocket upgrade, one `ChatSession` per connection
 * - `GET /api/chats/user/{username}` - Rooms of a participant, most recent first
 * - `GET /api/chats/{chatKey}` - One room by canonical key
 */

use axum::{routing::get, Router};

use crate::backend::chat::handlers::{get_chat, list_user_chats};
use crate::backend::chat::ws::handle_ws_upgrade;
use crate::backend::server::state::AppState;

/// Configure chat-related routes
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(handle_ws_upgrade))
        .route("/api/chats/user/{username}", get(list_user_chats))
        .route("/api/chats/{chat_key}", get(get_chat))
}
