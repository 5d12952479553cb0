//! Application and domain error types.
//!
//! [`DomainError`] describes why a classroom operation was rejected. Services
//! return it so callers (and tests) can match on the exact failure.
//! [`AppError`] is what handlers return: an HTTP status plus an
//! [`anyhow::Error`] rendered as `{"error": "..."}`.
//!
//! | DomainError | Status |
//! |-------------|--------|
//! | `NotFound` | 404 |
//! | `Unauthorized` | 403 |
//! | `Validation` | 400 |
//! | `DuplicateMembership` | 400 |
//! | `NoResults` | 404 |
//! | `Identity` | 401 |
//! | `Database` | 500 |

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure of a classroom operation.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A class, subject, exam or user id did not resolve.
    #[error("{0} not found")]
    NotFound(String),

    /// The caller does not hold the role the operation requires.
    #[error("{0}")]
    Unauthorized(String),

    /// A required field is missing or inconsistent.
    #[error("{0}")]
    Validation(String),

    /// The (user, class) pair already has a membership, whatever its role.
    #[error("Student is already enrolled in this class.")]
    DuplicateMembership,

    /// No ledger entry exists for the exam, or it holds no results.
    #[error("No results published for this exam yet.")]
    NoResults,

    /// The caller's credential could not be resolved to a user.
    #[error("{0}")]
    Identity(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity(message.into())
    }

    /// HTTP classification of this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::NoResults => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) | Self::DuplicateMembership => StatusCode::BAD_REQUEST,
            Self::Identity(_) => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(json!({
            "error": message
        }));

        (self.status, body).into_response()
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::new(err.status(), err)
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::from(err).into()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_domain_error_status_mapping() {
        assert_eq!(
            DomainError::not_found("Class").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(DomainError::NoResults.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            DomainError::unauthorized("nope").status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            DomainError::validation("Subject name is required.").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::DuplicateMembership.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            DomainError::identity("bad token").status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            DomainError::Database(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(DomainError::not_found("Exam").to_string(), "Exam not found");
    }

    #[test]
    fn test_app_error_from_domain_error_keeps_status() {
        let err: AppError = DomainError::DuplicateMembership.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.error.to_string(),
            "Student is already enrolled in this class."
        );
    }

    #[test]
    fn test_app_error_from_sqlx_error_is_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_into_response_renders_error_body() {
        let response = AppError::forbidden("Access denied").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Access denied");
    }

    #[tokio::test]
    async fn test_domain_error_renders_as_response() {
        let response = DomainError::validation("Invalid field type in request").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Invalid field type in request");
    }

    #[tokio::test]
    async fn test_into_response_hides_internal_details() {
        let response = AppError::internal(anyhow::anyhow!("connection reset")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Internal server error");
    }
}
