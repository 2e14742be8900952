//! The CompletionClient trait definition.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::message::{Completion, CompletionRequest};

/// Produces a completion for a list of chat messages.
///
/// Implementations range from deterministic canned responders to real
/// language-model APIs. Callers only ever see this trait, so the strategy is
/// chosen once at construction time. The trait is object-safe and is
/// normally held as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Submit a single non-streaming completion request.
    ///
    /// Transport and API failures are returned as `Err`; implementations
    /// must not panic on upstream errors.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError>;

    /// Get a human-readable name for this client implementation.
    fn name(&self) -> &str;

    /// Check if the client is ready to serve requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
