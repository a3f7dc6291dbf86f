/**
 * Chat Session
 *
 * One `ChatSession` exists per realtime connection. It turns decoded
 * `ClientEvent`s into store calls and registry broadcasts.
 *
 * # Error Boundary
 *
 * `handle` is the single place where handler failures are caught. Every
 * error is logged and answered with an `error` event sent to this connection
 * only; nothing is retried and the connection stays open.
 *
 * # Identity
 *
 * `join` binds the connection to an identity. Events that act on behalf of a
 * user (`chat_request`, `send_message`, `chat_accepted`, `join_chat`,
 * `delete_chat`) are rejected with `Forbidden` unless the bound identity
 * matches.
 */

use crate::backend::chat::store::SharedRoomStore;
use crate::backend::realtime::{ConnectionId, ConnectionRegistry, NotificationBridge};
use crate::backend::server::state::AppState;
use crate::shared::error::ChatError;
use crate::shared::event::{ClientEvent, ServerEvent};

/// Per-connection protocol state
#[derive(Clone)]
pub struct ChatSession {
    pub(super) connection_id: ConnectionId,
    pub(super) store: SharedRoomStore,
    pub(super) registry: ConnectionRegistry,
    pub(super) notifications: NotificationBridge,
}

impl ChatSession {
    pub fn new(
        connection_id: ConnectionId,
        store: SharedRoomStore,
        registry: ConnectionRegistry,
        notifications: NotificationBridge,
    ) -> Self {
        Self {
            connection_id,
            store,
            registry,
            notifications,
        }
    }

    /// Build a session for a connection already registered in `state.registry`
    pub fn from_state(connection_id: ConnectionId, state: &AppState) -> Self {
        Self::new(
            connection_id,
            state.store.clone(),
            state.registry.clone(),
            state.notifications.clone(),
        )
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Decode and handle one text frame
    pub async fn handle_text(&self, text: &str) {
        match ClientEvent::decode(text) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                tracing::warn!("[Chat] Malformed frame on connection {}: {}", self.connection_id, err);
                self.registry
                    .send_to(self.connection_id, ServerEvent::failure("malformed event", &err));
            }
        }
    }

    /// Handle one event to completion
    pub async fn handle(&self, event: ClientEvent) {
        let name = event.name();
        let failure = failure_message(&event);

        let result = match event {
            ClientEvent::Join { username } => self.join(&username),
            ClientEvent::Leave { username } => self.leave(&username),
            ClientEvent::ChatRequest { sender, receiver } => {
                self.chat_request(&sender, &receiver).await
            }
            ClientEvent::JoinChat { participants } => self.join_chat(&participants).await,
            ClientEvent::SendMessage {
                participants,
                sender,
                content,
                timestamp,
            } => {
                self.send_message(&participants, &sender, content, timestamp)
                    .await
            }
            ClientEvent::ChatAccepted {
                sender,
                receiver,
                room_id,
            } => self.chat_accepted(&sender, &receiver, room_id).await,
            ClientEvent::LeaveChat { participants } => self.leave_chat(&participants).await,
            // Authorization uses the room's stored participants, not the claimed ones
            ClientEvent::DeleteChat { room_id, .. } => self.delete_chat(room_id).await,
        };

        if let Err(err) = result {
            tracing::warn!(
                "[Chat] {} failed on connection {}: {}",
                name,
                self.connection_id,
                err
            );
            self.registry
                .send_to(self.connection_id, ServerEvent::failure(failure, &err));
        }
    }

    /// Connection closed: drop the binding and every room membership
    pub fn disconnect(&self) {
        let identity = self.registry.deregister(self.connection_id);
        tracing::info!(
            "[Chat] Connection {} closed (identity: {})",
            self.connection_id,
            identity.as_deref().unwrap_or("none")
        );
    }

    fn join(&self, username: &str) -> Result<(), ChatError> {
        if username.trim().is_empty() {
            return Err(ChatError::protocol("username must not be empty"));
        }

        match self.registry.bind(self.connection_id, username)? {
            Some(previous) if previous != username => tracing::info!(
                "[Chat] Connection {} rebound from {} to {}",
                self.connection_id,
                previous,
                username
            ),
            _ => tracing::info!("[Chat] Connection {} joined as {}", self.connection_id, username),
        }
        Ok(())
    }

    fn leave(&self, username: &str) -> Result<(), ChatError> {
        match self.registry.identity_of(self.connection_id) {
            None => Ok(()),
            Some(bound) if bound != username => Err(ChatError::protocol(format!(
                "connection is bound to {}, not {}",
                bound, username
            ))),
            Some(_) => {
                self.registry.unbind(self.connection_id);
                tracing::info!("[Chat] {} left on connection {}", username, self.connection_id);
                Ok(())
            }
        }
    }

    /// Identity bound to this connection
    pub(super) fn bound_identity(&self) -> Result<String, ChatError> {
        self.registry
            .identity_of(self.connection_id)
            .ok_or_else(|| ChatError::forbidden("connection has not joined with an identity"))
    }

    /// Require the bound identity to be exactly `claimed`
    pub(super) fn require_identity(&self, claimed: &str) -> Result<(), ChatError> {
        let bound = self.bound_identity()?;
        if bound == claimed {
            Ok(())
        } else {
            Err(ChatError::forbidden(format!(
                "connection is bound to {}, not {}",
                bound, claimed
            )))
        }
    }
}

fn failure_message(event: &ClientEvent) -> &'static str {
    match event {
        ClientEvent::Join { .. } => "failed to join",
        ClientEvent::Leave { .. } => "failed to leave",
        ClientEvent::ChatRequest { .. } => "failed to process chat request",
        ClientEvent::JoinChat { .. } => "failed to join chat",
        ClientEvent::SendMessage { .. } => "failed to send message",
        ClientEvent::ChatAccepted { .. } => "failed to accept chat",
        ClientEvent::LeaveChat { .. } => "failed to leave chat",
        ClientEvent::DeleteChat { .. } => "failed to delete chat",
    }
}
