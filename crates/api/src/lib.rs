//! HTTP surface for the restaurant chatbot.
//!
//! A thin axum layer over [`chat_orchestrator::ChatOrchestrator`]:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/api/chatbot` | chat turn, always 200 |
//! | `POST` | `/api/chatbot/feedback` | rate a logged exchange |
//! | `POST` | `/api/restaurants/:id/refresh` | rebuild the context snapshot |
//! | `GET` | `/api/restaurants/:id/context` | current context document |
//! | `GET` | `/api/health` | liveness and completion backend |

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

pub use config::{BlobBackend, Config, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Build the application with its state attached.
pub fn app(state: AppState) -> Router {
    routes::router().with_state(state)
}
