//! Delayed client - wraps another client with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use completion_core::{Completion, CompletionClient, CompletionError, CompletionRequest};
use tokio::time::sleep;

/// A client that wraps another client and adds artificial delay.
///
/// Useful for testing completion timeouts and simulating API latency.
pub struct DelayedClient<C: CompletionClient> {
    inner: C,
    delay: Duration,
}

impl<C: CompletionClient> DelayedClient<C> {
    /// Create a new DelayedClient wrapping the given client with the specified delay.
    pub fn new(inner: C, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a client with a delay in milliseconds.
    pub fn with_millis(inner: C, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: CompletionClient> CompletionClient for DelayedClient<C> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, CompletionError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        "DelayedClient"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
