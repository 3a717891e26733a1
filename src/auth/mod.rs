pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::PasswordHasher;
pub use session::{CookieSettings, SessionService, SESSION_COOKIE};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
///
/// Fields are optional so that a missing one can be reported as a 400 with a
/// specific message rather than a deserialization failure.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Both fields, if present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = non_empty(&self.username)?;
        let password = non_empty(&self.password)?;
        Some((username, password))
    }
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Between 3 and 32 characters: letters, digits, underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// At least 6 characters.
    #[validate(length(min = 6))]
    pub password: Option<String>,
}

impl RegisterRequest {
    pub fn has_required_fields(&self) -> bool {
        non_empty(&self.username).is_some()
            && non_empty(&self.email).is_some()
            && non_empty(&self.password).is_some()
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Body of every `/api/auth` response.
///
/// `user` is present after register, login and `/me`; `token` after register
/// and login only. The token is informational: requests authenticate with the
/// session cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            user: None,
            token: None,
        }
    }

    pub fn with_user(message: impl Into<String>, user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::message(message)
        }
    }

    pub fn with_session(message: impl Into<String>, user: User, token: String) -> Self {
        Self {
            token: Some(token),
            ..Self::with_user(message, user)
        }
    }
}
