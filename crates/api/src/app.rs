use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use shared::jwt::JwtConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{auth, chats, health, participants, requests, trips};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let jwt = Arc::new(config.jwt_config());
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        jwt,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::me));

    // Authentication is enforced per handler via the CurrentUser extractor
    let trip_routes = Router::new()
        .route("/api/v1/trips", post(trips::create_trip))
        .route("/api/v1/trips/feed", get(trips::get_feed))
        .route("/api/v1/trips/user/my-trips", get(trips::get_my_trips))
        .route(
            "/api/v1/trips/search/destinations",
            get(trips::search_destinations),
        )
        .route(
            "/api/v1/trips/:trip_id",
            get(trips::get_trip)
                .put(trips::update_trip)
                .delete(trips::cancel_trip),
        );

    let request_routes = Router::new()
        .route("/api/v1/requests", post(requests::create_request))
        .route("/api/v1/requests/trip/:trip_id", get(requests::list_for_trip))
        .route("/api/v1/requests/user/my-requests", get(requests::my_requests))
        .route(
            "/api/v1/requests/:request_id",
            put(requests::update_request_status).delete(requests::delete_request),
        );

    let participant_routes = Router::new()
        .route(
            "/api/v1/participants/trip/:trip_id",
            get(participants::list_for_trip),
        )
        .route(
            "/api/v1/participants/trip/:trip_id/user/:user_id",
            delete(participants::remove_participant),
        )
        .route(
            "/api/v1/participants/user/my-participations",
            get(participants::my_participations),
        );

    let chat_routes = Router::new()
        .route("/api/v1/chats/trip/:trip_id", get(chats::get_trip_chat))
        .route("/api/v1/chats/user/my-chats", get(chats::my_chats))
        .route(
            "/api/v1/chats/:chat_id/messages",
            get(chats::get_messages).post(chats::send_message),
        );

    let public_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(trip_routes)
        .merge(request_routes)
        .merge(participant_routes)
        .merge(chat_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .with_state(state)
}
