//! In-process blob store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{validate_key, BlobError, BlobStore};

/// Blob store backed by an in-memory ordered map.
///
/// The store can be switched offline, after which every operation fails
/// with [`BlobError::Unavailable`]. Tests use this to simulate an outage.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    fn check_online(&self) -> Result<(), BlobError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BlobError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), BlobError> {
        self.check_online()?;
        validate_key(key)?;
        self.blobs.write().await.insert(key.to_string(), data);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.check_online()?;
        validate_key(key)?;
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| BlobError::NotFound(key.to_string()))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        self.check_online()?;
        let blobs = self.blobs.read().await;
        Ok(blobs
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        self.check_online()?;
        validate_key(key)?;
        self.blobs.write().await.remove(key);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_overwrite() {
        let store = MemoryBlobStore::new();
        store.put("restaurant_1/a.json", b"one".to_vec()).await.unwrap();
        store.put("restaurant_1/a.json", b"two".to_vec()).await.unwrap();

        assert_eq!(store.get("restaurant_1/a.json").await.unwrap(), b"two");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = MemoryBlobStore::new();
        let err = store.get("restaurant_1/missing.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_list_by_prefix() {
        let store = MemoryBlobStore::new();
        for key in [
            "restaurant_1/2.json",
            "restaurant_1/1.json",
            "restaurant_10/1.json",
            "restaurant_2/1.json",
        ] {
            store.put(key, Vec::new()).await.unwrap();
        }

        let keys = store.list("restaurant_1/").await.unwrap();
        assert_eq!(keys, vec!["restaurant_1/1.json", "restaurant_1/2.json"]);
        assert_eq!(store.list("").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryBlobStore::new();
        store.put("k.json", b"x".to_vec()).await.unwrap();
        store.delete("k.json").await.unwrap();
        store.delete("k.json").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_offline() {
        let store = MemoryBlobStore::new();
        store.put("k.json", b"x".to_vec()).await.unwrap();

        store.set_offline(true);
        assert!(matches!(
            store.get("k.json").await,
            Err(BlobError::Unavailable(_))
        ));
        assert!(store.put("k2.json", Vec::new()).await.is_err());

        store.set_offline(false);
        assert_eq!(store.get("k.json").await.unwrap(), b"x");
    }
}
