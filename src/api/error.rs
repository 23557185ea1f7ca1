//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::analysis::AnalysisError;
use crate::db::DatabaseError;

/// Structured error response body. `error` is always present so clients can
/// show it as-is; `code` lets them branch without parsing text.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Payment required")]
    PaymentRequired,
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),
    #[error("Gateway failure: {0}")]
    Gateway(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status, machine code, and client-facing message. Internal detail is
    /// logged here and never returned.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                AnalysisError::RateLimited.to_string(),
            ),
            ApiError::PaymentRequired => (
                StatusCode::PAYMENT_REQUIRED,
                "PAYMENT_REQUIRED",
                AnalysisError::PaymentRequired.to_string(),
            ),
            ApiError::NotConfigured(detail) => {
                tracing::error!(%detail, "AI gateway not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "NOT_CONFIGURED",
                    detail.clone(),
                )
            }
            ApiError::Gateway(detail) => {
                tracing::error!(%detail, "AI gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GATEWAY_ERROR",
                    "AI gateway error".to_string(),
                )
            }
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail.clone()),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, Json(ErrorBody { error, code })).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::RateLimited => ApiError::RateLimited,
            AnalysisError::PaymentRequired => ApiError::PaymentRequired,
            AnalysisError::NotConfigured(detail) => ApiError::NotConfigured(detail),
            AnalysisError::Gateway(detail) => ApiError::Gateway(detail),
        }
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, id } => {
                ApiError::NotFound(format!("{entity_type} {id} not found"))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
