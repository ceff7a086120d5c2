use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recommender::RecommendationError;
use crate::skills::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Skill store error: {0}")]
    Store(#[from] StoreError),

    #[error("Recommendation provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Malformed recommendation response: {0}")]
    ProviderMalformedResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        if err.is_unavailable() {
            AppError::ProviderUnavailable(err.to_string())
        } else {
            AppError::ProviderMalformedResponse(err.to_string())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retryable) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), false),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                false,
            ),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
                false,
            ),
            AppError::Store(e) => {
                tracing::error!("Skill store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A storage error occurred".to_string(),
                    true,
                )
            }
            AppError::ProviderUnavailable(msg) => {
                tracing::warn!("Recommendation provider unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "PROVIDER_UNAVAILABLE",
                    "Could not connect to the recommendation engine".to_string(),
                    true,
                )
            }
            AppError::ProviderMalformedResponse(msg) => {
                tracing::error!("Malformed recommendation response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_MALFORMED_RESPONSE",
                    msg.clone(),
                    false,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    false,
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": retryable
            }
        }));

        (status, body).into_response()
    }
}
