//! Registration, login, and current-profile handlers.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{AuthResponse, LoginRequest, RegisterRequest, TokenPair, UserProfile};
use persistence::repositories::UserRepository;
use shared::password::{hash_password, verify_password};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentUser;

fn issue_tokens(state: &AppState, user_id: uuid::Uuid) -> Result<TokenPair, ApiError> {
    let (access_token, _) = state.jwt.generate_access_token(user_id)?;
    let (refresh_token, _) = state.jwt.generate_refresh_token(user_id)?;
    Ok(TokenPair {
        access_token,
        refresh_token,
        token_type: "bearer",
        expires_in: state.jwt.access_token_expiry_secs,
    })
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    payload.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    if repo.email_exists(&payload.email).await? {
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = repo
        .create(&payload.email, &password_hash, &payload.display_name)
        .await?;

    let tokens = issue_tokens(&state, user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            tokens,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    // One message for both unknown email and bad password
    let user = repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".into()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    }

    let tokens = issue_tokens(&state, user.id)?;
    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// GET /api/v1/auth/me
pub async fn me(current: CurrentUser) -> Json<UserProfile> {
    Json(current.user.into())
}
