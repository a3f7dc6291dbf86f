/**
 * Service Routes
 *
 * - `GET /api/health` - Liveness and open connection count
 * - `POST /api/notifications` - Hook for the post/comment services
 */

use axum::{
    routing::{get, post},
    Router,
};

use crate::backend::chat::handlers::{health, publish_notification};
use crate::backend::server::state::AppState;

/// Configure service routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        .route("/api/notifications", post(publish_notification))
}
