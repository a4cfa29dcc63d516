//! Trip domain models: lifecycle status, payloads, and feed responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::participant::ParticipantView;
use crate::models::user::UserProfile;

/// Lifecycle status of a trip.
///
/// A trip is created `active` and only ever soft-cancelled; `completed`
/// exists as a value but nothing transitions into it automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Active,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Active => "active",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if the trip can still accept requests and participants.
    pub fn is_active(&self) -> bool {
        matches!(self, TripStatus::Active)
    }
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TripStatus::Active),
            "completed" => Ok(TripStatus::Completed),
            "cancelled" => Ok(TripStatus::Cancelled),
            _ => Err(format!("Invalid trip status: {}", s)),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trip as stored, including the cached participant counter.
///
/// Invariant: `current_participants` equals the number of participant rows
/// for the trip and, while active, never exceeds `open_slots`. The counter
/// is only ever mutated inside the same transaction that inserts or deletes
/// a participant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    /// Creator of the trip record.
    pub user_id: Uuid,
    /// Host of the trip; currently always equal to `user_id`.
    pub host_id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub open_slots: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    /// Free-form preference document; never validated or interpreted.
    pub preferences: serde_json::Value,
    pub status: TripStatus,
    pub current_participants: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trip {
    /// Returns true if at least one slot is unfilled.
    pub fn has_open_slot(&self) -> bool {
        self.current_participants < self.open_slots
    }
}

fn default_open_slots() -> i32 {
    1
}

fn default_preferences() -> serde_json::Value {
    serde_json::json!({})
}

/// Payload for creating a trip.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_trip_payload"))]
pub struct CreateTripRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Destination must be between 1 and 255 characters"
    ))]
    pub destination: String,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[serde(default = "default_open_slots")]
    pub open_slots: i32,

    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,

    #[serde(default = "default_preferences")]
    pub preferences: serde_json::Value,
}

fn validate_trip_payload(payload: &CreateTripRequest) -> Result<(), ValidationError> {
    shared::validation::validate_date_range(payload.start_date, payload.end_date)?;
    shared::validation::validate_open_slots(payload.open_slots)?;
    if let Some(min) = payload.budget_min {
        shared::validation::validate_budget_value(min)?;
    }
    if let Some(max) = payload.budget_max {
        shared::validation::validate_budget_value(max)?;
    }
    shared::validation::validate_budget_range(payload.budget_min, payload.budget_max)
}

/// Payload for partially updating a trip. Only supplied fields are applied;
/// capacity is deliberately not re-validated against current occupancy.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTripRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: Option<String>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Destination must be between 1 and 255 characters"
    ))]
    pub destination: Option<String>,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    pub open_slots: Option<i32>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub preferences: Option<serde_json::Value>,
}

impl UpdateTripRequest {
    /// Returns true if no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.description.is_none()
            && self.open_slots.is_none()
            && self.budget_min.is_none()
            && self.budget_max.is_none()
            && self.preferences.is_none()
    }
}

/// Feed query filters; all optional, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripFeedFilters {
    pub destination: Option<String>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub available_slots_only: bool,
}

/// Compact trip representation for feed listings and request views.
#[derive(Debug, Clone, Serialize)]
pub struct TripSummary {
    pub id: Uuid,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub open_slots: i32,
    pub current_participants: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    pub status: TripStatus,
    pub host: UserProfile,
}

/// Full trip representation including the participant roster.
#[derive(Debug, Clone, Serialize)]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub host: UserProfile,
    pub creator: UserProfile,
    pub participants: Vec<ParticipantView>,
}

/// Destination autocomplete response.
#[derive(Debug, Clone, Serialize)]
pub struct DestinationSuggestions {
    pub destinations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_payload() -> CreateTripRequest {
        CreateTripRequest {
            title: "Himalayan trek".to_string(),
            destination: "Manali".to_string(),
            start_date: date(2026, 10, 1),
            end_date: date(2026, 10, 10),
            description: None,
            open_slots: 4,
            budget_min: Some(5000.0),
            budget_max: Some(12000.0),
            preferences: serde_json::json!({"pace": "relaxed"}),
        }
    }

    #[test]
    fn test_trip_status_roundtrip() {
        for status in [TripStatus::Active, TripStatus::Completed, TripStatus::Cancelled] {
            assert_eq!(TripStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(TripStatus::from_str("archived").is_err());
    }

    #[test]
    fn test_trip_status_serde() {
        assert_eq!(
            serde_json::to_string(&TripStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }

    #[test]
    fn test_create_payload_valid() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn test_create_payload_inverted_dates() {
        let mut payload = valid_payload();
        payload.end_date = date(2026, 9, 30);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_payload_equal_dates() {
        let mut payload = valid_payload();
        payload.end_date = payload.start_date;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_payload_zero_slots() {
        let mut payload = valid_payload();
        payload.open_slots = 0;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_payload_inverted_budget() {
        let mut payload = valid_payload();
        payload.budget_min = Some(20000.0);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_payload_defaults() {
        let payload: CreateTripRequest = serde_json::from_value(serde_json::json!({
            "title": "Weekend in Goa",
            "destination": "Goa",
            "start_date": "2026-11-01",
            "end_date": "2026-11-03"
        }))
        .unwrap();
        assert_eq!(payload.open_slots, 1);
        assert_eq!(payload.preferences, serde_json::json!({}));
    }

    #[test]
    fn test_update_payload_is_empty() {
        assert!(UpdateTripRequest::default().is_empty());
        let update = UpdateTripRequest {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_feed_filters_default() {
        let filters: TripFeedFilters = serde_json::from_str("{}").unwrap();
        assert!(!filters.available_slots_only);
        assert!(filters.destination.is_none());
    }
}
