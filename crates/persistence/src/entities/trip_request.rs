//! Trip request entity (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::{
    RequestStatus, TripRequest, TripRequestView, TripSummary, UserProfile,
};
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::trip::TripStatusDb;

/// Database enum for request_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
pub enum RequestStatusDb {
    Pending,
    Accepted,
    Rejected,
}

impl From<RequestStatusDb> for RequestStatus {
    fn from(db_status: RequestStatusDb) -> Self {
        match db_status {
            RequestStatusDb::Pending => RequestStatus::Pending,
            RequestStatusDb::Accepted => RequestStatus::Accepted,
            RequestStatusDb::Rejected => RequestStatus::Rejected,
        }
    }
}

impl From<RequestStatus> for RequestStatusDb {
    fn from(status: RequestStatus) -> Self {
        match status {
            RequestStatus::Pending => RequestStatusDb::Pending,
            RequestStatus::Accepted => RequestStatusDb::Accepted,
            RequestStatus::Rejected => RequestStatusDb::Rejected,
        }
    }
}

/// Database row mapping for the trip_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct TripRequestEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub status: RequestStatusDb,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TripRequestEntity> for TripRequest {
    fn from(entity: TripRequestEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            status: entity.status.into(),
            message: entity.message,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Request joined with requester profile and trip summary (including the
/// trip host's profile), for request listings.
#[derive(Debug, Clone, FromRow)]
pub struct RequestWithContextEntity {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub user_id: Uuid,
    pub status: RequestStatusDb,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    // Requester fields
    pub requester_email: String,
    pub requester_display_name: String,
    pub requester_created_at: DateTime<Utc>,
    // Trip fields
    pub trip_title: String,
    pub trip_destination: String,
    pub trip_start_date: NaiveDate,
    pub trip_end_date: NaiveDate,
    pub trip_open_slots: i32,
    pub trip_current_participants: i32,
    pub trip_budget_min: Option<f64>,
    pub trip_budget_max: Option<f64>,
    pub trip_status: TripStatusDb,
    // Trip host fields
    pub host_id: Uuid,
    pub host_email: String,
    pub host_display_name: String,
    pub host_created_at: DateTime<Utc>,
}

impl From<RequestWithContextEntity> for TripRequestView {
    fn from(entity: RequestWithContextEntity) -> Self {
        Self {
            id: entity.id,
            trip_id: entity.trip_id,
            user_id: entity.user_id,
            status: entity.status.into(),
            message: entity.message,
            created_at: entity.created_at,
            user: UserProfile {
                id: entity.user_id,
                email: entity.requester_email,
                display_name: entity.requester_display_name,
                created_at: entity.requester_created_at,
            },
            trip: TripSummary {
                id: entity.trip_id,
                title: entity.trip_title,
                destination: entity.trip_destination,
                start_date: entity.trip_start_date,
                end_date: entity.trip_end_date,
                open_slots: entity.trip_open_slots,
                current_participants: entity.trip_current_participants,
                budget_min: entity.trip_budget_min,
                budget_max: entity.trip_budget_max,
                status: entity.trip_status.into(),
                host: UserProfile {
                    id: entity.host_id,
                    email: entity.host_email,
                    display_name: entity.host_display_name,
                    created_at: entity.host_created_at,
                },
            },
        }
    }
}
