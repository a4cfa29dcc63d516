//! Trip lifecycle handlers: create, feed, detail, update, cancel, search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use domain::models::{
    CreateTripRequest, DestinationSuggestions, Trip, TripDetail, TripFeedFilters, TripSummary,
    UpdateTripRequest, UserProfile,
};
use persistence::repositories::{ParticipantRepository, TripRepository, UserRepository};
use serde::Deserialize;
use shared::pagination::{PageParams, Paginated, MAX_PER_PAGE};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_trip_created;

/// Feed query string: paging plus filters, all optional.
///
/// Kept flat (rather than composing PageParams and TripFeedFilters) because
/// query-string deserialization does not support flattened numeric fields.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    pub destination: Option<String>,
    pub start_date_from: Option<NaiveDate>,
    pub start_date_to: Option<NaiveDate>,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub available_slots_only: bool,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    shared::pagination::DEFAULT_PER_PAGE
}

impl FeedQuery {
    fn split(self) -> (PageParams, TripFeedFilters) {
        let params = PageParams {
            page: self.page,
            per_page: self.per_page,
        }
        .clamped(MAX_PER_PAGE);
        let filters = TripFeedFilters {
            destination: self.destination,
            start_date_from: self.start_date_from,
            start_date_to: self.start_date_to,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
            available_slots_only: self.available_slots_only,
        };
        (params, filters)
    }
}

/// POST /api/v1/trips
pub async fn create_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    payload.validate()?;

    let trip = TripRepository::new(state.pool.clone())
        .create(current.id(), &payload)
        .await?;
    record_trip_created();

    Ok((StatusCode::CREATED, Json(trip.into())))
}

/// GET /api/v1/trips/feed
pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Paginated<TripSummary>>, ApiError> {
    let (params, filters) = query.split();

    let repo = TripRepository::new(state.pool.clone());
    let total = repo.feed_count(&filters).await?;
    let items = repo
        .feed(&filters, params.limit(), params.offset())
        .await?
        .into_iter()
        .map(TripSummary::from)
        .collect();

    Ok(Json(Paginated::new(items, total, params)))
}

/// GET /api/v1/trips/:id
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripDetail>, ApiError> {
    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    let trip: Trip = trip.into();

    let users = UserRepository::new(state.pool.clone());
    let host: UserProfile = users
        .find_by_id(trip.host_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip host not found".into()))?
        .into();
    let creator: UserProfile = if trip.user_id == trip.host_id {
        host.clone()
    } else {
        users
            .find_by_id(trip.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Trip creator not found".into()))?
            .into()
    };

    let participants = ParticipantRepository::new(state.pool.clone())
        .list_for_trip(trip_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(TripDetail {
        trip,
        host,
        creator,
        participants,
    }))
}

/// GET /api/v1/trips/user/my-trips
pub async fn get_my_trips(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TripSummary>>, ApiError> {
    let trips = TripRepository::new(state.pool.clone())
        .list_for_user(current.id())
        .await?
        .into_iter()
        .map(TripSummary::from)
        .collect();
    Ok(Json(trips))
}

/// PUT /api/v1/trips/:id
pub async fn update_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<UpdateTripRequest>,
) -> Result<Json<Trip>, ApiError> {
    payload.validate()?;

    let repo = TripRepository::new(state.pool.clone());
    let trip = repo
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    if trip.host_id != current.id() {
        return Err(ApiError::Forbidden(
            "Only the trip host can update the trip".into(),
        ));
    }

    if payload.is_empty() {
        return Ok(Json(trip.into()));
    }

    let updated = repo
        .update_partial(trip_id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    Ok(Json(updated.into()))
}

/// DELETE /api/v1/trips/:id
pub async fn cancel_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TripRepository::new(state.pool.clone());
    let trip = repo
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    if trip.host_id != current.id() {
        return Err(ApiError::Forbidden(
            "Only the trip host can cancel the trip".into(),
        ));
    }

    repo.cancel(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;

    Ok(Json(
        serde_json::json!({ "message": "Trip cancelled successfully" }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct DestinationQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/trips/search/destinations
///
/// Queries shorter than two characters produce an empty suggestion list
/// rather than an error.
pub async fn search_destinations(
    State(state): State<AppState>,
    Query(query): Query<DestinationQuery>,
) -> Result<Json<DestinationSuggestions>, ApiError> {
    let trimmed = query.q.trim();
    if trimmed.chars().count() < 2 {
        return Ok(Json(DestinationSuggestions {
            destinations: Vec::new(),
        }));
    }

    let destinations = TripRepository::new(state.pool.clone())
        .search_destinations(trimmed, 10)
        .await?;
    Ok(Json(DestinationSuggestions { destinations }))
}
