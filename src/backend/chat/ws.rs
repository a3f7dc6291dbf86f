/**
 * Realtime WebSocket Endpoint
 *
 * `GET /ws` upgrades to a WebSocket and runs one chat session over it.
 *
 * # Connection Lifecycle
 *
 * 1. The connection is registered with a fresh outbound `mpsc` queue
 * 2. A writer task drains the queue into the socket as JSON text frames
 * 3. The read loop decodes each frame and awaits its handler to completion,
 *    so events from one connection are processed strictly in order
 * 4. On close or read error the session is torn down and the writer aborted
 */

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::backend::chat::handlers::ChatSession;
use crate::backend::server::state::AppState;
use crate::shared::event::ServerEvent;

/// Handle GET /ws
pub async fn handle_ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_connection(socket, state))
}

async fn run_connection(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let connection_id = state.registry.register(tx);
    let session = ChatSession::from_state(connection_id, &state);
    tracing::info!("[Realtime] Connection {} opened", connection_id);

    let mut writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("[Realtime] Failed to encode {} event: {}", event.name(), e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => session.handle_text(text.as_str()).await,
                Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                    Ok(text) => session.handle_text(text).await,
                    Err(_) => tracing::debug!("[Realtime] Ignoring non-UTF-8 binary frame on {}", connection_id),
                },
                Some(Ok(Message::Close(_))) | None => break,
                // Pings are answered by axum
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("[Realtime] Read error on {}: {}", connection_id, e);
                    break;
                }
            },
            // Writer ended: the peer stopped accepting frames
            _ = &mut writer => break,
        }
    }

    session.disconnect();
    writer.abort();
}
