//! Group chat repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ChatMessageEntity, GroupChatEntity, MessageTypeDb, MessageWithUserEntity};
use crate::metrics::QueryTimer;

const CHAT_COLUMNS: &str = "id, trip_id, name, created_at";
const MESSAGE_COLUMNS: &str = "id, chat_id, user_id, message, message_type, created_at";

/// Repository for group chat database operations.
#[derive(Clone)]
pub struct ChatRepository {
    pool: PgPool,
}

impl ChatRepository {
    /// Creates a new ChatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a chat by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupChatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_chat_by_id");
        let result = sqlx::query_as::<_, GroupChatEntity>(&format!(
            r#"
            SELECT {CHAT_COLUMNS}
            FROM group_chats
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get the chat for a trip, creating it on first access.
    ///
    /// The insert is conflict-tolerant so two concurrent first accesses both
    /// land on the same single row.
    pub async fn get_or_create_for_trip(
        &self,
        trip_id: Uuid,
        name: &str,
    ) -> Result<GroupChatEntity, sqlx::Error> {
        let timer = QueryTimer::new("get_or_create_chat");

        sqlx::query(
            r#"
            INSERT INTO group_chats (trip_id, name)
            VALUES ($1, $2)
            ON CONFLICT (trip_id) DO NOTHING
            "#,
        )
        .bind(trip_id)
        .bind(name)
        .execute(&self.pool)
        .await?;

        let result = sqlx::query_as::<_, GroupChatEntity>(&format!(
            r#"
            SELECT {CHAT_COLUMNS}
            FROM group_chats
            WHERE trip_id = $1
            "#,
        ))
        .bind(trip_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Newest-first page of messages with sender profiles.
    pub async fn list_messages(
        &self,
        chat_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MessageWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_chat_messages");
        let result = sqlx::query_as::<_, MessageWithUserEntity>(
            r#"
            SELECT m.id, m.chat_id, m.user_id, m.message, m.message_type, m.created_at,
                   u.email, u.display_name, u.created_at as user_created_at
            FROM chat_messages m
            JOIN users u ON m.user_id = u.id
            WHERE m.chat_id = $1
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(chat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total message count for a chat.
    pub async fn count_messages(&self, chat_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_chat_messages");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM chat_messages WHERE chat_id = $1
            "#,
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Append a message to a chat.
    pub async fn insert_message(
        &self,
        chat_id: Uuid,
        user_id: Uuid,
        message: &str,
        message_type: MessageTypeDb,
    ) -> Result<ChatMessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_chat_message");
        let result = sqlx::query_as::<_, ChatMessageEntity>(&format!(
            r#"
            INSERT INTO chat_messages (chat_id, user_id, message, message_type)
            VALUES ($1, $2, $3, $4)
            RETURNING {MESSAGE_COLUMNS}
            "#,
        ))
        .bind(chat_id)
        .bind(user_id)
        .bind(message)
        .bind(message_type)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Chats of trips the user currently belongs to, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<GroupChatEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_chats_for_user");
        let result = sqlx::query_as::<_, GroupChatEntity>(
            r#"
            SELECT c.id, c.trip_id, c.name, c.created_at
            FROM group_chats c
            JOIN trip_participants p ON p.trip_id = c.trip_id
            WHERE p.user_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
