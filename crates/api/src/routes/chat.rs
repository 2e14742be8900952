//! Chat and feedback endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chat_orchestrator::{
    ChatRequest, ChatResponse, FeedbackRequest, EMPTY_INPUT_ERROR, INVALID_REQUEST_ERROR,
};
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Status {
    pub status: &'static str,
}

/// Answer one chat turn. Failures are reported in the body, never as an
/// error status. That includes bodies that do not parse.
pub async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Json<ChatResponse> {
    match payload {
        Ok(Json(request)) => Json(state.orchestrator.handle(request).await),
        Err(rejection) => {
            let detail = rejection.body_text();
            warn!("Rejected chat request: {}", detail);
            Json(ChatResponse::invalid_request(rejection_error(&detail)))
        }
    }
}

fn rejection_error(detail: &str) -> &'static str {
    if detail.contains("user_input") {
        EMPTY_INPUT_ERROR
    } else {
        INVALID_REQUEST_ERROR
    }
}


/// Rate a logged exchange.
pub async fn feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<Status>> {
    state.orchestrator.submit_feedback(&request).await?;
    Ok(Json(Status { status: "ok" }))
}
