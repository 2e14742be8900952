//! Route handlers for the chatbot API.

pub mod chat;
pub mod context;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Chat
        .route("/api/chatbot", post(chat::chat))
        .route("/api/chatbot/feedback", post(chat::feedback))
        // Operator context endpoints
        .route("/api/restaurants/:id/refresh", post(context::refresh))
        .route("/api/restaurants/:id/context", get(context::context))
        // Health check
        .route("/api/health", get(health::health))
}
