//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every handler returns `Result<_, AppError>`, and every error body has the same
//! `{ "success": false, "message": ... }` shape as a successful response.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so the `?` operator in a
//! handler or middleware turns it into the right status code. Server-side failures are
//! logged here and replaced by a generic message before they reach the client.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Message sent to clients in place of any server-side failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Missing or invalid session (HTTP 401).
    Unauthorized(String),
    /// Missing, malformed or duplicate input (HTTP 400).
    BadRequest(String),
    /// Resource absent or owned by someone else (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the storage layer (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg.as_str()
            }
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                INTERNAL_ERROR_MESSAGE
            }
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::failure(message))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// A unique violation on `users.username`/`users.email` is a duplicate
/// registration. Any other unique violation (a session token collision) is a
/// server error.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref db_err)
                if db_err.is_unique_violation() && db_err.message().contains("users.") =>
            {
                AppError::BadRequest("Username or email already exists".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Validation failures are client errors; the field-level detail is kept in the message.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::BadRequest(format!("Invalid input: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid session".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::DatabaseError("disk I/O error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_internal_details_are_not_leaked() {
        let error = AppError::DatabaseError("no such table: tasks".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], INTERNAL_ERROR_MESSAGE);
        assert!(!String::from_utf8_lossy(&body).contains("no such table"));
    }

    #[actix_rt::test]
    async fn test_client_errors_carry_their_message() {
        let error = AppError::NotFound("Task not found".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Task not found");
        assert!(json.get("data").is_none());
    }

    #[actix_rt::test]
    async fn test_unique_violations_by_table() {
        let db = crate::db::Database::connect_in_memory().await.unwrap();
        let user = db.create_user("alice", "alice@example.com", "digest").await.unwrap();

        let duplicate = db
            .create_user("alice", "other@example.com", "digest")
            .await
            .unwrap_err();
        match AppError::from(duplicate) {
            AppError::BadRequest(msg) => assert_eq!(msg, "Username or email already exists"),
            other => panic!("expected BadRequest, got {:?}", other),
        }

        let expires_at = chrono::Utc::now() + chrono::Duration::hours(1);
        db.insert_session(user.id, "same-token", expires_at).await.unwrap();
        let collision = db
            .insert_session(user.id, "same-token", expires_at)
            .await
            .unwrap_err();
        assert!(matches!(AppError::from(collision), AppError::DatabaseError(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, AppError::NotFound(_)));

        let error: AppError = sqlx::Error::PoolClosed.into();
        assert!(matches!(error, AppError::DatabaseError(_)));
    }
}
