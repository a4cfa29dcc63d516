//! Trip participant entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{ParticipantRole, ParticipantView, TripParticipant, UserProfile};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for participant_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "participant_role", rename_all = "lowercase")]
pub enum ParticipantRoleDb {
    Host,
    Participant,
}

impl From<ParticipantRoleDb> for ParticipantRole {
    fn from(db_role: ParticipantRoleDb) -> Self {
        match db_role {
            ParticipantRoleDb::Host => ParticipantRole::Host,
            ParticipantRoleDb::Participant => ParticipantRole::Participant,
        }
    }
}

impl From<ParticipantRole> for ParticipantRoleDb {
    fn from(role: ParticipantRole) -> Self {
        match role {
            ParticipantRole::Host => ParticipantRoleDb::Host,
            ParticipantRole::Participant => ParticipantRoleDb::Participant,
        }
    }
}

/// Database row mapping for the trip_participants table.
#[derive(Debug, Clone, FromRow)]
pub struct TripParticipantEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<TripParticipantEntity> for TripParticipant {
    fn from(entity: TripParticipantEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Participant joined with the member's profile, for roster listings.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipantWithUserEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRoleDb,
    pub joined_at: DateTime<Utc>,
    // User fields
    pub email: String,
    pub display_name: String,
    pub user_created_at: DateTime<Utc>,
}

impl From<ParticipantWithUserEntity> for ParticipantView {
    fn from(entity: ParticipantWithUserEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
            user: UserProfile {
                id: entity.user_id,
                email: entity.email,
                display_name: entity.display_name,
                created_at: entity.user_created_at,
            },
        }
    }
}
