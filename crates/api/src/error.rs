//! Error types for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chat_orchestrator::ChatError;
use thiserror::Error;

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Orchestrator failure.
    #[error(transparent)]
    Chat(#[from] ChatError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let ApiError::Chat(err) = &self;

        let (status, message) = match err {
            ChatError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ChatError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ChatError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Service unavailable".to_string())
            }
            ChatError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
