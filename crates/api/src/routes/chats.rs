//! Group chat handlers, all gated on current trip membership.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{ChatMessage, ChatMessageView, GroupChat, SendMessagePayload};
use persistence::repositories::{ChatRepository, ParticipantRepository, TripRepository};
use shared::pagination::{PageParams, Paginated};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

/// Hard cap on messages per page.
const MAX_MESSAGES_PER_PAGE: i64 = 100;

async fn require_membership(
    state: &AppState,
    trip_id: Uuid,
    user_id: Uuid,
) -> Result<(), ApiError> {
    let is_member = ParticipantRepository::new(state.pool.clone())
        .is_participant(trip_id, user_id)
        .await?;
    if !is_member {
        return Err(ApiError::Forbidden(
            "You must be a trip participant to access the chat".into(),
        ));
    }
    Ok(())
}

/// GET /api/v1/chats/trip/:trip_id
///
/// The chat is created lazily on first access, named after the destination.
pub async fn get_trip_chat(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<GroupChat>, ApiError> {
    let trip = TripRepository::new(state.pool.clone())
        .find_by_id(trip_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".into()))?;
    require_membership(&state, trip_id, current.id()).await?;

    let chat = ChatRepository::new(state.pool.clone())
        .get_or_create_for_trip(trip_id, &format!("Trip to {}", trip.destination))
        .await?;
    Ok(Json(chat.into()))
}

/// GET /api/v1/chats/:chat_id/messages
///
/// Pages walk backwards from the newest message; each page is delivered in
/// chronological order.
pub async fn get_messages(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(chat_id): Path<Uuid>,
    Query(params): Query<PageParams>,
) -> Result<Json<Paginated<ChatMessageView>>, ApiError> {
    let chats = ChatRepository::new(state.pool.clone());
    let chat = chats
        .find_by_id(chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    require_membership(&state, chat.trip_id, current.id()).await?;

    let params = params.clamped(MAX_MESSAGES_PER_PAGE);
    let total = chats.count_messages(chat_id).await?;
    let mut items: Vec<ChatMessageView> = chats
        .list_messages(chat_id, params.limit(), params.offset())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    items.reverse();

    Ok(Json(Paginated::new(items, total, params)))
}

/// POST /api/v1/chats/:chat_id/messages
pub async fn send_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(chat_id): Path<Uuid>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<(StatusCode, Json<ChatMessageView>), ApiError> {
    payload.validate()?;

    let chats = ChatRepository::new(state.pool.clone());
    let chat = chats
        .find_by_id(chat_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Chat not found".into()))?;
    require_membership(&state, chat.trip_id, current.id()).await?;

    let message: ChatMessage = chats
        .insert_message(
            chat_id,
            current.id(),
            &payload.message,
            payload.message_type.into(),
        )
        .await?
        .into();

    let view = ChatMessageView {
        id: message.id,
        chat_id: message.chat_id,
        user_id: message.user_id,
        message: message.message,
        message_type: message.message_type,
        created_at: message.created_at,
        user: current.user.into(),
    };
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/chats/user/my-chats
pub async fn my_chats(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<GroupChat>>, ApiError> {
    let chats = ChatRepository::new(state.pool.clone())
        .list_for_user(current.id())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(chats))
}
