//! Trip membership domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::user::UserProfile;

/// Role of a trip member. Exactly one `host` row exists per trip and it can
/// never be removed through the participant paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Host,
    Participant,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Host => "host",
            ParticipantRole::Participant => "participant",
        }
    }

    /// Returns true if this member can be removed (self-leave or by host).
    pub fn is_removable(&self) -> bool {
        matches!(self, ParticipantRole::Participant)
    }
}

impl FromStr for ParticipantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host" => Ok(ParticipantRole::Host),
            "participant" => Ok(ParticipantRole::Participant),
            _ => Err(format!("Invalid participant role: {}", s)),
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A membership record linking a user to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripParticipant {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub joined_at: DateTime<Utc>,
}

/// Participant enriched with the member's profile for responses.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub joined_at: DateTime<Utc>,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        assert_eq!(ParticipantRole::from_str("host").unwrap(), ParticipantRole::Host);
        assert_eq!(
            ParticipantRole::from_str("PARTICIPANT").unwrap(),
            ParticipantRole::Participant
        );
        assert!(ParticipantRole::from_str("guest").is_err());
    }

    #[test]
    fn test_host_is_not_removable() {
        assert!(!ParticipantRole::Host.is_removable());
        assert!(ParticipantRole::Participant.is_removable());
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&ParticipantRole::Host).unwrap(), "\"host\"");
    }
}
