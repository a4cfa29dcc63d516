//! Common test utilities for integration tests.
//!
//! These tests run against a real PostgreSQL instance addressed by the
//! `TEST_DATABASE_URL` environment variable (falling back to `DATABASE_URL`).
//! When no database is reachable the tests skip themselves instead of failing,
//! so the suite stays green on machines without PostgreSQL.

// Allow dead code in this module - these are helper utilities that may not be
// used by every integration test binary.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tripnect_api::{app::create_app, config::Config};
use uuid::Uuid;

/// A live application plus its database pool.
pub struct TestContext {
    pub app: Router,
    pub pool: PgPool,
}

/// Connect to the test database, run migrations, and build the app.
///
/// Returns `None` (after printing a skip notice) when no test database is
/// configured or reachable. Tests should early-return in that case.
pub async fn try_setup() -> Option<TestContext> {
    let url = match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
        Ok(url) => url,
        Err(_) => {
            eprintln!("skipping: TEST_DATABASE_URL is not set");
            return None;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&url)
        .await
    {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("skipping: test database unreachable: {err}");
            return None;
        }
    };

    persistence::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config::load_for_test(&[("database.url", url.as_str())])
        .expect("Failed to build test config");
    let app = create_app(config, pool.clone());

    Some(TestContext { app, pool })
}

/// Generate a unique email for testing.
pub fn unique_test_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}

/// Test user data.
pub struct TestUser {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

impl TestUser {
    pub fn new() -> Self {
        Self {
            email: unique_test_email(),
            password: "SecureP@ss123!".to_string(),
            display_name: "Test Traveler".to_string(),
        }
    }
}

impl Default for TestUser {
    fn default() -> Self {
        Self::new()
    }
}

/// Authenticated user context for tests.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub access_token: String,
}

/// Register a user via the API and return their credentials.
pub async fn create_authenticated_user(app: &Router, user: &TestUser) -> AuthenticatedUser {
    use tower::ServiceExt;

    let request = json_request(
        Method::POST,
        "/api/v1/auth/register",
        serde_json::json!({
            "email": user.email,
            "password": user.password,
            "display_name": user.display_name
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    if !status.is_success() {
        panic!("Registration failed with status {status}, body: {body}");
    }

    AuthenticatedUser {
        user_id: body["user"]["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(|| panic!("Missing user.id in response: {body}")),
        email: body["user"]["email"].as_str().unwrap().to_string(),
        access_token: body["tokens"]["access_token"]
            .as_str()
            .unwrap_or_else(|| panic!("Missing tokens.access_token in response: {body}"))
            .to_string(),
    }
}

/// Test trip data with a unique destination per instance.
#[derive(Debug, Clone)]
pub struct TestTrip {
    pub title: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub open_slots: i32,
    pub budget_min: Option<f64>,
    pub budget_max: Option<f64>,
}

impl TestTrip {
    pub fn new() -> Self {
        Self {
            title: "Test trek".to_string(),
            destination: format!("Testville-{}", Uuid::new_v4().simple()),
            start_date: "2027-03-01".to_string(),
            end_date: "2027-03-10".to_string(),
            open_slots: 4,
            budget_min: Some(5000.0),
            budget_max: Some(15000.0),
        }
    }

    pub fn with_open_slots(mut self, open_slots: i32) -> Self {
        self.open_slots = open_slots;
        self
    }

    pub fn with_destination(mut self, destination: &str) -> Self {
        self.destination = destination.to_string();
        self
    }

    fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "title": self.title,
            "destination": self.destination,
            "start_date": self.start_date,
            "end_date": self.end_date,
            "open_slots": self.open_slots,
            "budget_min": self.budget_min,
            "budget_max": self.budget_max
        })
    }
}

impl Default for TestTrip {
    fn default() -> Self {
        Self::new()
    }
}

/// Created trip context.
pub struct CreatedTrip {
    pub id: Uuid,
    pub destination: String,
}

/// Create a trip via the API. Panics on failure.
pub async fn create_test_trip(app: &Router, host: &AuthenticatedUser, trip: &TestTrip) -> CreatedTrip {
    use tower::ServiceExt;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/trips",
        trip.payload(),
        &host.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(
        status,
        axum::http::StatusCode::CREATED,
        "Failed to create trip: {body}"
    );

    CreatedTrip {
        id: body["id"]
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(|| panic!("Missing id in trip response: {body}")),
        destination: body["destination"].as_str().unwrap().to_string(),
    }
}

/// Submit a join request for a trip. Panics on failure; returns the request id.
pub async fn submit_join_request(app: &Router, guest: &AuthenticatedUser, trip_id: Uuid) -> Uuid {
    use tower::ServiceExt;

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/requests",
        serde_json::json!({ "trip_id": trip_id, "message": "Count me in" }),
        &guest.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(
        status,
        axum::http::StatusCode::CREATED,
        "Failed to submit join request: {body}"
    );

    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(|| panic!("Missing id in request response: {body}"))
}

/// Submit a request and have the host accept it.
pub async fn join_trip(
    app: &Router,
    host: &AuthenticatedUser,
    guest: &AuthenticatedUser,
    trip_id: Uuid,
) -> Uuid {
    use tower::ServiceExt;

    let request_id = submit_join_request(app, guest, trip_id).await;
    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/requests/{request_id}"),
        serde_json::json!({ "status": "accepted" }),
        &host.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = parse_response_body(response).await;
    assert_eq!(
        status,
        axum::http::StatusCode::OK,
        "Failed to accept join request: {body}"
    );
    request_id
}

/// Build a JSON request without authentication.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a JSON request with bearer authentication.
pub fn json_request_with_auth(
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a GET request with bearer authentication.
pub fn get_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Build a DELETE request with bearer authentication.
pub fn delete_request_with_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse a JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}
