/**
 * Notification Bridge
 *
 * Fan-out hook used by the chat session and by the post/comment services:
 *
 * - `refresh_chat_lists` tells every connection of each identity to re-fetch
 *   its room list
 * - `notify` pushes a like/comment notification to the recipient
 *
 * Delivery is live only. There is no queue for offline recipients.
 */

use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::event::ServerEvent;
use crate::shared::messaging::Notification;

/// Pushes list-refresh signals and notifications to identity groups
#[derive(Clone)]
pub struct NotificationBridge {
    registry: ConnectionRegistry,
}

impl NotificationBridge {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Send `update_chat_list` to every connection of each identity
    ///
    /// Returns the total number of deliveries.
    pub fn refresh_chat_lists<I, S>(&self, identities: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identities
            .into_iter()
            .map(|identity| {
                self.registry
                    .broadcast_to_identity(identity.as_ref(), ServerEvent::UpdateChatList)
            })
            .sum()
    }

    /// Push a notification to its recipient
    ///
    /// Notifications about a user's own action are dropped.
    pub fn notify(&self, notification: Notification) -> usize {
        if notification.is_self_notification() {
            tracing::debug!(
                "[Notify] Skipping self-notification for {} on post {}",
                notification.recipient,
                notification.post_id
            );
            return 0;
        }

        let recipient = notification.recipient.clone();
        let delivered = self
            .registry
            .broadcast_to_identity(&recipient, ServerEvent::Notification(notification));
        tracing::debug!("[Notify] Notification for {} reached {} connection(s)", recipient, delivered);
        delivered
    }
}
