//! Participant roster handlers: list, remove, my participations.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{ParticipantView, TripSummary};
use domain::services::{check_remove, RemovalKind, TripGate};
use persistence::repositories::{ParticipantRepository, TripRepository};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// GET /api/v1/participants/trip/:trip_id
pub async fn list_for_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<ParticipantView>>, ApiError> {
    TripRepository::new(state.pool.clone())
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;

    let participants = ParticipantRepository::new(state.pool.clone())
        .list_for_trip(trip_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(participants))
}

/// DELETE /api/v1/participants/trip/:trip_id/user/:user_id
pub async fn remove_participant(
    State(state): State<AppState>,
    current: CurrentUser,
    Path((trip_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;

    let participants = ParticipantRepository::new(state.pool.clone());
    let participant = participants
        .find_for_trip_user(trip_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Participant not found".into()))?;

    let gate = TripGate {
        host_id: trip.host_id,
        status: trip.status.into(),
        open_slots: trip.open_slots,
        current_participants: trip.current_participants,
    };
    let kind = check_remove(&gate, current.id(), user_id, participant.role.into())?;

    participants.remove(trip_id, user_id).await?;

    let message = match kind {
        RemovalKind::Left => "You have left the trip",
        RemovalKind::Removed => "Participant removed successfully",
    };
    Ok(Json(serde_json::json!({ "message": message })))
}

/// GET /api/v1/participants/user/my-participations
pub async fn my_participations(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TripSummary>>, ApiError> {
    let trips = ParticipantRepository::new(state.pool.clone())
        .list_trips_for_user(current.id())
        .await?
        .into_iter()
        .map(TripSummary::from)
        .collect();
    Ok(Json(trips))
}
