// Centralized error handling for the help center

use crate::models::api::ErrorResponse;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Outcome of every refused help center operation.
///
/// None of these are fatal: callers get them back as values and decide how to
/// present them. Nothing here is retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HelpCenterError {
    #[error("Login required")]
    AuthRequired,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("Message text must not be empty")]
    EmptyMessage,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Email already has admin access: {0}")]
    DuplicateAdmin(String),

    #[error("Cannot remove the last admin email")]
    LastAdmin,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Request body, query string or path could not be decoded
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to persist data: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HelpCenterError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            HelpCenterError::AuthRequired => StatusCode::UNAUTHORIZED,
            HelpCenterError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            HelpCenterError::AdminRequired => StatusCode::FORBIDDEN,
            HelpCenterError::EmailTaken => StatusCode::CONFLICT,
            HelpCenterError::DuplicateAdmin(_) => StatusCode::CONFLICT,
            HelpCenterError::LastAdmin => StatusCode::CONFLICT,
            HelpCenterError::PasswordMismatch => StatusCode::BAD_REQUEST,
            HelpCenterError::InvalidRating(_) => StatusCode::BAD_REQUEST,
            HelpCenterError::EmptyMessage => StatusCode::BAD_REQUEST,
            HelpCenterError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
            HelpCenterError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            HelpCenterError::NotFound(_) => StatusCode::NOT_FOUND,
            HelpCenterError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HelpCenterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HelpCenterError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for HelpCenterError {
    fn from(rejection: JsonRejection) -> Self {
        HelpCenterError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for HelpCenterError {
    fn from(rejection: QueryRejection) -> Self {
        HelpCenterError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for HelpCenterError {
    fn from(rejection: PathRejection) -> Self {
        HelpCenterError::InvalidRequest(rejection.body_text())
    }
}

/// Failures inside a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<StoreError> for HelpCenterError {
    fn from(err: StoreError) -> Self {
        HelpCenterError::Storage(err.to_string())
    }
}
