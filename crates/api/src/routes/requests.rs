//! Join-request handlers: submit, list, decide, withdraw.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateTripRequestPayload, RequestDecision, RequestDecisionResponse, TripRequest,
    TripRequestView, UpdateRequestStatusPayload,
};
use domain::services::{check_decision, check_submit, TripGate};
use persistence::entities::{TripEntity, TripStatusDb};
use persistence::repositories::{
    AcceptOutcome, ParticipantRepository, TripRepository, TripRequestRepository,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::middleware::metrics::record_request_accepted;

fn gate_for(trip: &TripEntity) -> TripGate {
    TripGate {
        host_id: trip.host_id,
        status: trip.status.into(),
        open_slots: trip.open_slots,
        current_participants: trip.current_participants,
    }
}

/// POST /api/v1/requests
///
/// The capacity check here is advisory; the authoritative one runs under
/// the trip row lock at acceptance time.
pub async fn create_request(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<CreateTripRequestPayload>,
) -> Result<(StatusCode, Json<TripRequest>), ApiError> {
    payload.validate()?;

    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(payload.trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    // A cancelled or completed trip is not accepting requests; to the
    // requester it is indistinguishable from a missing one.
    if trip.status != TripStatusDb::Active {
        return Err(ApiError::NotFound("Trip not found or not active".into()));
    }

    let requests = TripRequestRepository::new(state.pool.clone());
    let has_existing = requests.exists_for(trip.id, current.id()).await?;
    let is_participant = ParticipantRepository::new(state.pool.clone())
        .is_participant(trip.id, current.id())
        .await?;

    check_submit(&gate_for(&trip), current.id(), has_existing, is_participant)?;

    let request = requests
        .create(trip.id, current.id(), payload.message.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(request.into())))
}

/// GET /api/v1/requests/trip/:trip_id
pub async fn list_for_trip(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<TripRequestView>>, ApiError> {
    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    if trip.host_id != current.id() {
        return Err(ApiError::Forbidden(
            "Only the trip host can view requests for the trip".into(),
        ));
    }

    let requests = TripRequestRepository::new(state.pool.clone())
        .list_for_trip(trip_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(requests))
}

/// GET /api/v1/requests/user/my-requests
pub async fn my_requests(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<TripRequestView>>, ApiError> {
    let requests = TripRequestRepository::new(state.pool.clone())
        .list_for_user(current.id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(requests))
}

/// PUT /api/v1/requests/:id
pub async fn update_request_status(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(request_id): Path<Uuid>,
    Json(payload): Json<UpdateRequestStatusPayload>,
) -> Result<Json<RequestDecisionResponse>, ApiError> {
    let requests = TripRequestRepository::new(state.pool.clone());
    let request = requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".into()))?;
    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(request.trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;

    // Advisory pass; acceptance is re-checked atomically below
    check_decision(
        &gate_for(&trip),
        current.id(),
        request.status.into(),
        payload.status,
    )?;

    let message = match payload.status {
        RequestDecision::Accepted => {
            match requests.accept(request_id).await? {
                AcceptOutcome::Accepted(_) => {
                    record_request_accepted();
                    "Request accepted successfully"
                }
                AcceptOutcome::NotFound => {
                    return Err(ApiError::NotFound("Request not found".into()))
                }
                AcceptOutcome::RequestNotPending => {
                    return Err(ApiError::Validation(
                        "Request has already been processed".into(),
                    ))
                }
                AcceptOutcome::TripNotActive => {
                    return Err(ApiError::Validation("Trip is no longer active".into()))
                }
                AcceptOutcome::NoOpenSlots => {
                    return Err(ApiError::Capacity("No open slots available".into()))
                }
            }
        }
        RequestDecision::Rejected => {
            requests.reject(request_id).await?.ok_or_else(|| {
                ApiError::Validation("Request has already been processed".into())
            })?;
            "Request rejected successfully"
        }
    };

    let view = requests
        .find_view(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".into()))?;
    Ok(Json(RequestDecisionResponse {
        message: message.to_string(),
        request: view.into(),
    }))
}

/// DELETE /api/v1/requests/:id
pub async fn delete_request(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(request_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let requests = TripRequestRepository::new(state.pool.clone());
    let request = requests
        .find_by_id(request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".into()))?;
    if request.user_id != current.id() {
        return Err(ApiError::Forbidden(
            "Only the requester can delete the request".into(),
        ));
    }

    requests.delete(request_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Request deleted successfully" }),
    ))
}
