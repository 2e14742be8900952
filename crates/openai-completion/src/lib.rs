//! OpenAI-compatible completion client.
//!
//! This crate provides a [`CompletionClient`] implementation that talks to
//! any endpoint speaking the OpenAI `/v1/chat/completions` protocol.
//!
//! # Features
//!
//! - Single non-streaming request per call
//! - Per-request model, temperature and max-token overrides
//! - Bounded request timeout
//! - Token usage passed through unmodified
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use openai_completion::{CompletionClient, CompletionRequest, OpenAiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenAiClient::from_env()?;
//!     let request = CompletionRequest::with_system(
//!         "You are a helpful waiter assistant.",
//!         Vec::new(),
//!         "Do you have vegan dishes?",
//!     );
//!     let completion = client.complete(request).await?;
//!     println!("{}", completion.text);
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::{OpenAiConfig, OpenAiConfigBuilder};

// Re-export completion-core types for convenience
pub use completion_core::{
    async_trait, ChatMessage, Completion, CompletionClient, CompletionError, CompletionRequest,
    Role, TokenUsage,
};
