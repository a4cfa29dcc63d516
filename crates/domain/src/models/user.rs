//! User domain models and authentication payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A registered user. The password hash never leaves the persistence layer
/// boundary except through this struct, which is not serialized.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile embedded in trip, request, and chat responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            created_at: user.created_at,
        }
    }
}

/// Registration payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Display name must be between 1 and 100 characters"
    ))]
    pub display_name: String,
}

/// Login payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Issued token pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// Response for register/login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub tokens: TokenPair,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            email: "traveler@example.com".to_string(),
            password: "correct-horse".to_string(),
            display_name: "Traveler".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_bad_email() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "correct-horse".to_string(),
            display_name: "Traveler".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let req = RegisterRequest {
            email: "traveler@example.com".to_string(),
            password: "short".to_string(),
            display_name: "Traveler".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_user_profile_from_user() {
        let user = User {
            id: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            password_hash: "$argon2id$...".to_string(),
            display_name: "A".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let profile = UserProfile::from(user.clone());
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email, user.email);
    }
}
