//! Group chat domain models.
//!
//! One chat per trip, created lazily on first access. Messages are an
//! append-only sequence visible only to current participants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::UserProfile;

/// Kind of chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    System,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::System => "system",
        }
    }
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::Text
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(MessageType::Text),
            "image" => Ok(MessageType::Image),
            "system" => Ok(MessageType::System),
            _ => Err(format!("Invalid message type: {}", s)),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The per-trip group chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupChat {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
}

/// Message enriched with the sender's profile for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageView {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub message_type: MessageType,
    pub created_at: DateTime<Utc>,
    pub user: UserProfile,
}

/// Payload for posting a message.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessagePayload {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1 to 2000 characters"))]
    pub message: String,

    #[serde(default)]
    pub message_type: MessageType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_roundtrip() {
        for kind in [MessageType::Text, MessageType::Image, MessageType::System] {
            assert_eq!(MessageType::from_str(kind.as_str()).unwrap(), kind);
        }
        assert!(MessageType::from_str("video").is_err());
    }

    #[test]
    fn test_message_type_default() {
        let payload: SendMessagePayload =
            serde_json::from_str(r#"{"message": "anyone up for a night trek?"}"#).unwrap();
        assert_eq!(payload.message_type, MessageType::Text);
    }

    #[test]
    fn test_empty_message_rejected() {
        let payload: SendMessagePayload = serde_json::from_str(r#"{"message": ""}"#).unwrap();
        assert!(payload.validate().is_err());
    }
}
