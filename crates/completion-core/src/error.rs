//! Error types for completion requests.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The client is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request never reached the API or the connection dropped.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API answered but the body was unusable.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request did not complete in time.
    #[error("completion timed out")]
    Timeout,

    /// The backend is temporarily unavailable.
    #[error("completion backend unavailable: {0}")]
    Unavailable(String),
}

impl CompletionError {
    /// Whether the failure is on the upstream side rather than ours.
    pub fn is_upstream(&self) -> bool {
        !matches!(self, CompletionError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = CompletionError::Api {
            status: 429,
            message: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "API error (429): rate limited");
    }

    #[test]
    fn test_is_upstream() {
        assert!(CompletionError::Timeout.is_upstream());
        assert!(CompletionError::Network("refused".into()).is_upstream());
        assert!(!CompletionError::Configuration("no key".into()).is_upstream());
    }
}
