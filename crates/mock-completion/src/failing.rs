//! A client that always fails.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use completion_core::{Completion, CompletionClient, CompletionError, CompletionRequest};

#[derive(Debug, Clone)]
enum Failure {
    Unavailable(String),
    Api(u16, String),
    Timeout,
}

/// A client whose every request fails with the same error.
///
/// Useful for exercising the orchestrator's apology path and logging of
/// failed exchanges.
#[derive(Debug)]
pub struct FailingClient {
    failure: Failure,
    calls: AtomicUsize,
}

impl FailingClient {
    /// Fail with `CompletionError::Unavailable`.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::with_failure(Failure::Unavailable(message.into()))
    }

    /// Fail with `CompletionError::Api`.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::with_failure(Failure::Api(status, message.into()))
    }

    /// Fail with `CompletionError::Timeout`.
    pub fn timeout() -> Self {
        Self::with_failure(Failure::Timeout)
    }

    fn with_failure(failure: Failure) -> Self {
        Self {
            failure,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for FailingClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<Completion, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(match &self.failure {
            Failure::Unavailable(message) => CompletionError::Unavailable(message.clone()),
            Failure::Api(status, message) => CompletionError::Api {
                status: *status,
                message: message.clone(),
            },
            Failure::Timeout => CompletionError::Timeout,
        })
    }

    fn name(&self) -> &str {
        "FailingClient"
    }

    async fn is_ready(&self) -> bool {
        false
    }
}
