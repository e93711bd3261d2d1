//! Error handling - RFC 7807 responses.
//!
//! Each failure kind maps to one status code on every endpoint.
//! Authentication failures carry no detail, and internal failures are logged
//! here and never echoed to the caller.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use pulse_core::error::RepoError;
use pulse_core::ports::AuthError;
use pulse_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    MissingFields,
    BadRequest(String),
    DuplicateEmail,
    InvalidCredentials,
    InvalidApiKey,
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingFields => write!(f, "Missing required fields"),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::DuplicateEmail => write!(f, "Email already exists"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::InvalidApiKey => write!(f, "Invalid API key"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidApiKey => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code().as_u16();
        let error = match self {
            AppError::MissingFields => ErrorResponse::bad_request("Missing required fields"),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::DuplicateEmail => {
                ErrorResponse::new(status, "Conflict").with_detail("Email already exists")
            }
            AppError::InvalidCredentials => ErrorResponse::new(status, "Invalid Credentials"),
            AppError::InvalidApiKey => ErrorResponse::new(status, "Invalid API Key"),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Connection(msg) => {
                AppError::Internal(format!("database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("database query error: {}", msg)),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            AuthError::InvalidApiKey => AppError::InvalidApiKey,
            AuthError::UnencodableField(field) => {
                AppError::BadRequest(format!("{} contains unsupported characters", field))
            }
            AuthError::Repository(e) => AppError::Internal(e.to_string()),
            e @ (AuthError::HashingError(_) | AuthError::SecretGeneration(_)) => {
                AppError::Internal(e.to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
