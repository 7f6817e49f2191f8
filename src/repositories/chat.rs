use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::db::DbPool;
use crate::errors::Result;
use crate::models::ChatMessage;
use crate::repositories::ChatRepository;

/// Conversation store backed by the `chat_messages` table
#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: DbPool,
}

impl SqliteChatRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn row_to_message(row: &sqlx::sqlite::SqliteRow) -> Result<ChatMessage> {
        let role: String = row.try_get("role")?;
        let timestamp: DateTime<Utc> = row.try_get("timestamp")?;
        Ok(ChatMessage {
            id: Some(row.try_get("id")?),
            session_id: row.try_get("session_id")?,
            role: role.parse()?,
            message: row.try_get("message")?,
            timestamp,
        })
    }

    /// Most recent `count` rows for a session, returned in
    /// chronological order. Ties on the timestamp are broken by the
    /// auto-increment id so same-tick messages keep insertion order.
    async fn recent_rows(&self, session_id: &str, count: i64) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, role, message, timestamp
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        let mut messages = rows
            .iter()
            .map(Self::row_to_message)
            .collect::<Result<Vec<_>>>()?;
        messages.reverse();
        Ok(messages)
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn save_message(&self, message: ChatMessage) -> Result<ChatMessage> {
        let mut message = message;
        let result = sqlx::query(
            r#"
            INSERT INTO chat_messages (session_id, role, message, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&message.session_id)
        .bind(message.role.as_str())
        .bind(&message.message)
        .bind(message.timestamp)
        .execute(&self.pool)
        .await?;
        message.id = Some(result.last_insert_rowid());
        Ok(message)
    }

    async fn recent_messages(&self, session_id: &str, count: i64) -> Result<Vec<ChatMessage>> {
        if count <= 0 {
            return Ok(Vec::new());
        }
        self.recent_rows(session_id, count).await
    }

    async fn session_history(
        &self,
        session_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>> {
        match limit {
            Some(limit) if limit <= 0 => Ok(Vec::new()),
            Some(limit) => self.recent_rows(session_id, limit).await,
            None => {
                let rows = sqlx::query(
                    r#"
                    SELECT id, session_id, role, message, timestamp
                    FROM chat_messages
                    WHERE session_id = ?
                    ORDER BY timestamp ASC, id ASC
                    "#,
                )
                .bind(session_id)
                .fetch_all(&self.pool)
                .await?;
                rows.iter().map(Self::row_to_message).collect()
            }
        }
    }

    async fn delete_session(&self, session_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
