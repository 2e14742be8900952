//! Core trait and types for chat-completion clients.
//!
//! This crate provides the shared interface between the chat orchestrator and
//! whatever produces completions for it. It defines:
//!
//! - [`CompletionClient`] - The trait every completion backend implements
//! - [`ChatMessage`] / [`Role`] - Conversation turns sent to the model
//! - [`CompletionRequest`] / [`Completion`] - One request/response cycle
//! - [`CompletionError`] - Failures surfaced by a backend
//!
//! # Example
//!
//! ```rust
//! use completion_core::{async_trait, Completion, CompletionClient, CompletionError, CompletionRequest};
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl CompletionClient for Parrot {
//!     async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
//!         let text = request.last_user_text().unwrap_or_default().to_string();
//!         Ok(Completion::stop(text, "parrot"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Parrot"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;

pub use error::CompletionError;
pub use message::{ChatMessage, Completion, CompletionRequest, Role, TokenUsage};
pub use prompt::hash_prompt;
pub use trait_def::CompletionClient;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
