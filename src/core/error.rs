use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

/// Storage-level failure classes reported by every repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("repository: entity with given params not found")]
    RecordNotFound,

    #[error("repository: entity with given params already exists")]
    RecordAlreadyExists,

    #[error("repository: something wrong with the database")]
    Database,
}

/// Failure classes a service method may return to the HTTP layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("service: data with given param not found")]
    DataNotFound,

    #[error("service: data already exists")]
    DataAlreadyExists,

    #[error("service: time parsing failed")]
    TimeParsing,

    #[error("service: invalid payload")]
    InvalidPayload,

    #[error("service: credential not match")]
    CredentialNotMatch,

    #[error("service: repository error happened")]
    Repository,
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::DataNotFound => StatusCode::NOT_FOUND,
            ServiceError::DataAlreadyExists
            | ServiceError::TimeParsing
            | ServiceError::InvalidPayload => StatusCode::BAD_REQUEST,
            ServiceError::CredentialNotMatch => StatusCode::UNAUTHORIZED,
            ServiceError::Repository => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message for this error kind
    pub fn message(&self) -> &'static str {
        match self {
            ServiceError::DataNotFound => "Resource with given ID not found.",
            ServiceError::DataAlreadyExists => "Data already exists.",
            ServiceError::TimeParsing => {
                "Invalid time format. Please use RFC822 time format (02 Jan 06 15:04 MST)"
            }
            ServiceError::InvalidPayload => {
                "Invalid payload. Please check the payload schema in the API Documentation."
            }
            ServiceError::CredentialNotMatch => "Username and password not match.",
            ServiceError::Repository => "Something went wrong.",
        }
    }
}

/// Translate any lower-level error into a service error.
///
/// Repository errors keep their meaning; everything else (generator failures,
/// token signing, external lookups that escaped classification) collapses
/// into [`ServiceError::Repository`].
pub fn map_error<E>(err: E) -> ServiceError
where
    E: std::error::Error + 'static,
{
    let err: &(dyn std::error::Error + 'static) = &err;
    match err.downcast_ref::<RepositoryError>() {
        Some(RepositoryError::RecordNotFound) => ServiceError::DataNotFound,
        Some(RepositoryError::RecordAlreadyExists) => ServiceError::DataAlreadyExists,
        Some(RepositoryError::Database) | None => ServiceError::Repository,
    }
}

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Route not found")]
    NotFound,

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Rate limit exceeded")]
    TooManyRequests,

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Service(ref e) => {
                if *e == ServiceError::Repository {
                    tracing::warn!("Request failed with repository error");
                }
                (e.status_code(), e.message().to_string())
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Request Entity Too Large".to_string(),
            ),
            AppError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too Many Requests".to_string(),
            ),
            AppError::Unknown(ref msg) => {
                tracing::error!("Unknown error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unknown Error.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
