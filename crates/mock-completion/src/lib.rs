//! Deterministic completion clients.
//!
//! This crate provides implementations of the `CompletionClient` trait that
//! never touch the network:
//! - `KeywordMockClient` - Keyword-triggered canned replies
//! - `FailingClient` - Always fails, for exercising error paths
//! - `DelayedClient` - Wraps another client with artificial latency
//!
//! For production completions, use the `openai-completion` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_completion::{CompletionClient, CompletionRequest, KeywordMockClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_completion::CompletionError> {
//!     let client = KeywordMockClient::restaurant_defaults();
//!
//!     let request = CompletionRequest::with_system(
//!         "You are a helpful waiter assistant for Bella Italia.",
//!         Vec::new(),
//!         "What are your hours on Sunday?",
//!     );
//!
//!     let completion = client.complete(request).await?;
//!     println!("Response: {}", completion.text);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod keyword;

// Re-export completion-core types for convenience
pub use completion_core::{
    async_trait, ChatMessage, Completion, CompletionClient, CompletionError, CompletionRequest,
    Role, TokenUsage,
};

pub use delayed::DelayedClient;
pub use failing::FailingClient;
pub use keyword::{KeywordMockClient, KeywordRule, MOCK_MODEL};
