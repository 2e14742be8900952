//! Key/value blob storage.
//!
//! Context snapshots are written as opaque byte blobs under slash-separated
//! keys such as `restaurant_1/20240101120000000000.json`. The [`BlobStore`]
//! trait is the seam; [`LocalBlobStore`] keeps blobs on disk and
//! [`MemoryBlobStore`] keeps them in process for tests.

mod error;
mod local;
mod memory;

pub use error::BlobError;
pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use async_trait::async_trait;

/// Storage for opaque blobs addressed by string keys.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, replacing any previous blob.
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), BlobError>;

    /// Fetch the blob stored under `key`.
    ///
    /// Returns [`BlobError::NotFound`] when the key is absent.
    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError>;

    /// All keys starting with `prefix`, in ascending order.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError>;

    /// Remove the blob under `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// Human-readable name of the backend.
    fn name(&self) -> &str;
}

/// Reject keys that could escape the store or collide with directory paths.
pub fn validate_key(key: &str) -> Result<(), BlobError> {
    let invalid = |reason: &str| -> Result<(), BlobError> {
        Err(BlobError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        })
    };

    if key.is_empty() {
        return invalid("key is empty");
    }
    if key.starts_with('/') || key.ends_with('/') {
        return invalid("key must not start or end with '/'");
    }
    if key.contains('\\') || key.contains('\0') {
        return invalid("key contains a forbidden character");
    }
    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return invalid("key contains an empty or relative segment");
    }
    Ok(())
}
