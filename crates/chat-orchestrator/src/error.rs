//! Error types for context assembly, caching and chat handling.

use blob_store::BlobError;
use completion_core::CompletionError;
use restaurant_db::DatabaseError;
use thiserror::Error;

/// Errors from building a context document.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// No restaurant row exists for the id.
    #[error("restaurant not found: {0}")]
    NotFound(i64),

    /// Reading the restaurant data failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Errors from the context cache.
///
/// Blob-store failures during reads are handled internally as cache
/// misses; they only surface here from operator calls such as listing or
/// pruning snapshots.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No restaurant row exists for the id.
    #[error("restaurant not found: {0}")]
    NotFound(i64),

    /// Reading or updating the restaurant failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Blob store failure.
    #[error(transparent)]
    Blob(#[from] BlobError),

    /// The document could not be serialized.
    #[error("context serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AssembleError> for CacheError {
    fn from(err: AssembleError) -> Self {
        match err {
            AssembleError::NotFound(id) => CacheError::NotFound(id),
            AssembleError::Database(e) => CacheError::Database(e),
        }
    }
}

/// Failure taxonomy surfaced by the chat orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The restaurant or log entry does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The blob store or completion API is unreachable or erroring.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The request was rejected before any work was done.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Anything unexpected.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DatabaseError> for ChatError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity, id } => {
                ChatError::NotFound(format!("{} {}", entity, id))
            }
            DatabaseError::Validation(e) => ChatError::Validation(e.to_string()),
            other => ChatError::Internal(other.to_string()),
        }
    }
}

impl From<CacheError> for ChatError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound(id) => ChatError::NotFound(format!("Restaurant {}", id)),
            CacheError::Blob(e) => ChatError::UpstreamUnavailable(e.to_string()),
            CacheError::Database(e) => ChatError::from(e),
            CacheError::Serialization(e) => ChatError::Internal(e.to_string()),
        }
    }
}

impl From<CompletionError> for ChatError {
    fn from(err: CompletionError) -> Self {
        if err.is_upstream() {
            ChatError::UpstreamUnavailable(err.to_string())
        } else {
            ChatError::Internal(err.to_string())
        }
    }
}

/// Errors from building components out of settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The real completion client could not be configured.
    #[error("completion client configuration failed: {0}")]
    Completion(#[from] CompletionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use restaurant_db::ValidationError;

    #[test]
    fn test_database_error_mapping() {
        let err = ChatError::from(DatabaseError::NotFound {
            entity: "ChatbotLog",
            id: "7".to_string(),
        });
        assert!(matches!(err, ChatError::NotFound(ref msg) if msg == "ChatbotLog 7"));

        let err = ChatError::from(DatabaseError::Validation(ValidationError::Empty(
            "name".to_string(),
        )));
        assert!(matches!(err, ChatError::Validation(_)));
    }

    #[test]
    fn test_cache_error_mapping() {
        assert!(matches!(
            ChatError::from(CacheError::NotFound(3)),
            ChatError::NotFound(_)
        ));
        assert!(matches!(
            ChatError::from(CacheError::Blob(BlobError::Unavailable("down".into()))),
            ChatError::UpstreamUnavailable(_)
        ));
    }

    #[test]
    fn test_completion_error_mapping() {
        assert!(matches!(
            ChatError::from(CompletionError::Timeout),
            ChatError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            ChatError::from(CompletionError::Configuration("no key".into())),
            ChatError::Internal(_)
        ));
    }
}
