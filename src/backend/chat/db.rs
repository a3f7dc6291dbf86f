/**
 * PostgreSQL Room Store
 *
 * This module persists rooms and their messages to PostgreSQL. The schema
 * lives in `migrations/` and is applied by `sqlx::migrate!` at startup.
 *
 * # Tables
 *
 * - `chat_rooms` - one row per room, UNIQUE on the sorted participant pair;
 *   `chat_key` is the display string only
 * - `chat_room_messages` - one row per message, ordered by `seq`
 *
 * # Atomicity
 *
 * - Creation uses `INSERT .. ON CONFLICT (participant_a, participant_b) DO NOTHING` followed by a
 *   read, so racing creators converge on the row that won.
 * - Appends run in one transaction that first updates the room row (taking
 *   its row lock and proving it still exists) and then inserts the message.
 *   No read-modify-write of the whole message list ever happens.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::chat::store::RoomStore;
use crate::shared::error::ChatError;
use crate::shared::messaging::{ChatMessage, Room, RoomId, RoomKey};

impl From<sqlx::Error> for ChatError {
    fn from(err: sqlx::Error) -> Self {
        ChatError::store(err.to_string())
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    chat_key: String,
    participant_a: String,
    participant_b: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RoomRow {
    fn into_room(self, messages: Vec<ChatMessage>) -> Room {
        Room {
            id: self.id,
            chat_id: self.chat_key,
            participants: vec![self.participant_a, self.participant_b],
            messages,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    room_id: Uuid,
    sender: String,
    content: String,
    sent_at: DateTime<Utc>,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        ChatMessage {
            sender: row.sender,
            content: row.content,
            timestamp: row.sent_at,
        }
    }
}

const ROOM_COLUMNS: &str = "id, chat_key, participant_a, participant_b, created_at, updated_at";

/// Room store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgRoomStore {
    pool: PgPool,
}

impl PgRoomStore {
    /// Wrap an existing, migrated pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_messages(&self, room_id: RoomId) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT room_id, sender, content, sent_at
            FROM chat_room_messages
            WHERE room_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }

    async fn find_row(&self, key: &RoomKey) -> Result<Option<RoomRow>, sqlx::Error> {
        let [a, b] = key.participants();
        sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {} FROM chat_rooms WHERE participant_a = $1 AND participant_b = $2",
            ROOM_COLUMNS
        ))
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await
    }

    async fn hydrate(&self, row: RoomRow) -> Result<Room, ChatError> {
        let messages = self.load_messages(row.id).await?;
        Ok(row.into_room(messages))
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn find_or_create(&self, key: &RoomKey) -> Result<Room, ChatError> {
        let [a, b] = key.participants();
        let chat_key = key.to_string();

        let inserted = sqlx::query(
            r#"
            INSERT INTO chat_rooms (id, chat_key, participant_a, participant_b, created_at, updated_at)
            VALUES ($1, $2, $3, $4, NOW(), NOW())
            ON CONFLICT (participant_a, participant_b) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&chat_key)
        .bind(a)
        .bind(b)
        .execute(&self.pool)
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::debug!("[Store] Created room for {}", chat_key);
        }

        let row = self
            .find_row(key)
            .await?
            // Deleted between the insert and the read
            .ok_or_else(|| ChatError::room_not_found(&chat_key))?;

        self.hydrate(row).await
    }

    async fn append_message(&self, room_id: RoomId, message: ChatMessage) -> Result<Room, ChatError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, RoomRow>(&format!(
            "UPDATE chat_rooms SET updated_at = NOW() WHERE id = $1 RETURNING {}",
            ROOM_COLUMNS
        ))
        .bind(room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ChatError::room_not_found(room_id))?;

        sqlx::query(
            r#"
            INSERT INTO chat_room_messages (room_id, sender, content, sent_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(room_id)
        .bind(&message.sender)
        .bind(&message.content)
        .bind(message.timestamp)
        .execute(&mut *tx)
        .await?;

        let messages = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT room_id, sender, content, sent_at
            FROM chat_room_messages
            WHERE room_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_room(messages.into_iter().map(ChatMessage::from).collect()))
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<bool, ChatError> {
        let result = sqlx::query("DELETE FROM chat_rooms WHERE id = $1")
            .bind(room_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_participant(&self, identity: &str) -> Result<Vec<Room>, ChatError> {
        let rows = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {} FROM chat_rooms WHERE participant_a = $1 OR participant_b = $1 ORDER BY updated_at DESC",
            ROOM_COLUMNS
        ))
        .bind(identity)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let message_rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT room_id, sender, content, sent_at
            FROM chat_room_messages
            WHERE room_id = ANY($1)
            ORDER BY seq ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut messages: HashMap<Uuid, Vec<ChatMessage>> = HashMap::new();
        for row in message_rows {
            messages.entry(row.room_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let room_messages = messages.remove(&row.id).unwrap_or_default();
                row.into_room(room_messages)
            })
            .collect())
    }

    async fn find_by_room_id(&self, room_id: RoomId) -> Result<Option<Room>, ChatError> {
        let row = sqlx::query_as::<_, RoomRow>(&format!(
            "SELECT {} FROM chat_rooms WHERE id = $1",
            ROOM_COLUMNS
        ))
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_key(&self, key: &RoomKey) -> Result<Option<Room>, ChatError> {
        match self.find_row(key).await? {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }
}
