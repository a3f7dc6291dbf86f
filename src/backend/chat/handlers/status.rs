/**
 * Service Handlers
 *
 * - `GET /api/health` - liveness plus the number of open realtime connections
 * - `POST /api/notifications` - entry point for the post/comment services to
 *   push a like or comment notification to its recipient
 */

use axum::{extract::State, Json};
use serde::Serialize;

use crate::backend::realtime::{ConnectionRegistry, NotificationBridge};
use crate::shared::messaging::Notification;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub connections: usize,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub delivered: usize,
}

/// Handle GET /api/health
pub async fn health(State(registry): State<ConnectionRegistry>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        connections: registry.connection_count(),
    })
}

/// Handle POST /api/notifications
pub async fn publish_notification(
    State(notifications): State<NotificationBridge>,
    Json(notification): Json<Notification>,
) -> Json<NotificationResponse> {
    let delivered = notifications.notify(notification);
    Json(NotificationResponse { delivered })
}
