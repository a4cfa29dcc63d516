//! Trip entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{Trip, TripStatus, TripSummary, UserProfile};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for trip_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "trip_status", rename_all = "lowercase")]
pub enum TripStatusDb {
    Active,
    Completed,
    Cancelled,
}

impl From<TripStatusDb> for TripStatus {
    fn from(db_status: TripStatusDb) -> Self {
        match db_status {
            TripStatusDb::Active => TripStatus::Active,
            TripStatusDb::Completed => TripStatus::Completed,
            TripStatusDb::Cancelled => TripStatus::Cancelled,
        }
    }
}

impl From<TripStatus> for TripStatusDb {
    fn from(status: TripStatus) -> Self {
        match status {
            TripStatus::Active => TripStatusDb::Active,
            TripStatus::Completed => TripStatusDb::Completed,
            TripStatus::Cancelled => TripStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the trips table.
#[derive(Debug, Clone, FromRow)]
pub struct TripEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub host_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub open_slots: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub preferences: serde_json::Value,
    pub status: TripStatusDb,
    pub current_participants: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripEntity> for Trip {
    fn from(entity: TripEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            host_id: entity.host_id,
            title: entity.title,
            destination: entity.destination,
            start_date: entity.start_date,
            end_date: entity.end_date,
            description: entity.description,
            open_slots: entity.open_slots,
            budget_min: entity.budget_min,
            budget_max: entity.budget_max,
            preferences: entity.preferences,
            status: entity.status.into(),
            current_participants: entity.current_participants,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Trip joined with its host's profile, for feed listings.
#[derive(Debug, Clone, FromRow)]
pub struct TripWithHostEntity {
    pub id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub open_slots: i32,
    pub current_participants: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub status: TripStatusDb,
    // Host fields
    pub host_id: Uuid,
    pub host_email: String,
    pub host_display_name: String,
    pub host_created_at: DateTime<Utc>,
}

impl From<TripWithHostEntity> for TripSummary {
    fn from(entity: TripWithHostEntity) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            destination: entity.destination,
            start_date: entity.start_date,
            end_date: entity.end_date,
            open_slots: entity.open_slots,
            current_participants: entity.current_participants,
            budget_min: entity.budget_min,
            budget_max: entity.budget_max,
            status: entity.status.into(),
            host: UserProfile {
                id: entity.host_id,
                email: entity.host_email,
                display_name: entity.host_display_name,
                created_at: entity.host_created_at,
            },
        }
    }
}
