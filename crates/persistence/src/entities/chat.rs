//! Group chat entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::{ChatMessage, ChatMessageView, GroupChat, MessageType, UserProfile};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for message_type that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "message_type", rename_all = "lowercase")]
pub enum MessageTypeDb {
    Text,
    Image,
    System,
}

impl From<MessageTypeDb> for MessageType {
    fn from(db_type: MessageTypeDb) -> Self {
        match db_type {
            MessageTypeDb::Text => MessageType::Text,
            MessageTypeDb::Image => MessageType::Image,
            MessageTypeDb::System => MessageType::System,
        }
    }
}

impl From<MessageType> for MessageTypeDb {
    fn from(message_type: MessageType) -> Self {
        match message_type {
            MessageType::Text => MessageTypeDb::Text,
            MessageType::Image => MessageTypeDb::Image,
            MessageType::System => MessageTypeDb::System,
        }
    }
}

/// Database row mapping for the group_chats table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupChatEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GroupChatEntity> for GroupChat {
    fn from(entity: GroupChatEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            name: entity.name,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the chat_messages table.
#[derive(Debug, Clone, FromRow)]
pub struct ChatMessageEntity {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub message_type: MessageTypeDb,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessageEntity> for ChatMessage {
    fn from(entity: ChatMessageEntity) -> Self {
        Self {
            id: entity.id,
            chat_id: entity.chat_id,
            user_id: entity.user_id,
            message: entity.message,
            message_type: entity.message_type.into(),
            created_at: entity.created_at,
        }
    }
}

/// Message joined with the sender's profile, for delivery.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithUserEntity {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub message_type: MessageTypeDb,
    pub created_at: DateTime<Utc>,
    // Sender fields
    pub email: String,
    pub display_name: String,
    pub user_created_at: DateTime<Utc>,
}

impl From<MessageWithUserEntity> for ChatMessageView {
    fn from(entity: MessageWithUserEntity) -> Self {
        Self {
            id: entity.id,
            chat_id: entity.chat_id,
            user_id: entity.user_id,
            message: entity.message,
            message_type: entity.message_type.into(),
            created_at: entity.created_at,
            user: UserProfile {
                id: entity.user_id,
                email: entity.email,
                display_name: entity.display_name,
                created_at: entity.user_created_at,
            },
        }
    }
}
