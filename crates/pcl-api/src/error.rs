//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps [`PostalCodeError`] and lookup failures to HTTP status codes and
//! JSON bodies of the form `{"error":{"code":"…","message":"…"}}`.
//! Internal error details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pcl_core::{PostalCodeError, ResolveError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "INVALID_POSTAL_CODE", "NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The path segment is not a Canadian postal code, or its FSA has no region (400).
    #[error("{0}")]
    InvalidPostalCode(String),

    /// No municipality is recorded for the FSA (404).
    #[error("{0}")]
    NotFound(String),

    /// The municipality backend failed (503).
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The municipality lookup did not finish in time (504).
    #[error("municipality lookup timed out after {0} ms")]
    LookupTimeout(u128),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidPostalCode(_) => (StatusCode::BAD_REQUEST, "INVALID_POSTAL_CODE"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            Self::LookupTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "LOOKUP_TIMEOUT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) | Self::LookupTimeout(_) => {
                tracing::warn!(error = %self, "municipality backend unavailable")
            }
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert classification errors to API errors.
impl From<PostalCodeError> for AppError {
    fn from(err: PostalCodeError) -> Self {
        match err {
            PostalCodeError::InvalidFormat | PostalCodeError::InvalidFsa => {
                Self::InvalidPostalCode(err.to_string())
            }
            PostalCodeError::MunicipalityLookupFailed(inner) => inner.into(),
        }
    }
}

/// Convert resolver errors to API errors.
impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound(_) => Self::NotFound(err.to_string()),
            ResolveError::Backend(_) => Self::ServiceUnavailable(err.to_string()),
        }
    }
}
