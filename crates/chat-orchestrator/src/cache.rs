//! Snapshot cache for context documents.
//!
//! Each refresh writes a new immutable snapshot to the blob store and moves
//! the restaurant's pointer to it. Reads follow the pointer and never check
//! freshness against the relational rows; a document only changes when
//! someone refreshes it. Any blob failure on the read path is a cache miss.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use blob_store::BlobStore;
use chrono::{DateTime, Utc};
use restaurant_db::{restaurant, Database};
use tracing::{debug, info, warn};

use crate::assembler::ContextAssembler;
use crate::context::ContextDocument;
use crate::error::CacheError;

/// Format of `context_refreshed_at` on the restaurant row.
const REFRESHED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Distinguishes snapshots taken within the same microsecond.
static SNAPSHOT_SEQ: AtomicU64 = AtomicU64::new(0);

const SNAPSHOT_SEQ_MODULUS: u64 = 1_000_000;

/// Result of a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed {
    pub document: ContextDocument,
    /// Key the snapshot was stored under, `None` if the blob write failed.
    pub cache_key: Option<String>,
}

/// Blob-backed cache of assembled context documents.
#[derive(Clone)]
pub struct ContextCache {
    db: Database,
    store: Arc<dyn BlobStore>,
    assembler: ContextAssembler,
    retention: Option<usize>,
}

impl ContextCache {
    /// Create a cache that keeps every snapshot.
    pub fn new(db: Database, store: Arc<dyn BlobStore>) -> Self {
        Self {
            assembler: ContextAssembler::new(db.clone()),
            db,
            store,
            retention: None,
        }
    }

    /// Keep only the newest `keep` snapshots per restaurant after each refresh.
    pub fn with_retention(mut self, keep: Option<usize>) -> Self {
        self.retention = keep;
        self
    }

    /// Name of the underlying blob store.
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// Return the cached document, rebuilding it when there is none or it
    /// cannot be read.
    pub async fn get_or_build(&self, restaurant_id: i64) -> Result<ContextDocument, CacheError> {
        let restaurant = restaurant::find_restaurant(self.db.pool(), restaurant_id)
            .await?
            .ok_or(CacheError::NotFound(restaurant_id))?;

        if let Some(key) = restaurant.cached_context_key.as_deref() {
            if let Some(document) = self.load(restaurant_id, key).await {
                debug!("Context cache hit for restaurant {} ({})", restaurant_id, key);
                return Ok(document);
            }
        }

        Ok(self.refresh(restaurant_id).await?.document)
    }

    async fn load(&self, restaurant_id: i64, key: &str) -> Option<ContextDocument> {
        let bytes = match self.store.get(key).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    "Context snapshot {} unreadable for restaurant {}: {}",
                    key, restaurant_id, e
                );
                return None;
            }
        };

        match ContextDocument::from_json_slice(&bytes) {
            Ok(document) if document.is_current() => Some(document),
            Ok(document) => {
                info!(
                    "Context snapshot {} has schema version {}, rebuilding",
                    key, document.schema_version
                );
                None
            }
            Err(e) => {
                warn!("Context snapshot {} is corrupt: {}", key, e);
                None
            }
        }
    }

    /// Assemble a fresh document, store it as a new snapshot and point the
    /// restaurant at it.
    ///
    /// Fails only when the restaurant does not exist or the relational store
    /// cannot be read; blob and pointer failures are logged and the fresh
    /// document is still returned.
    pub async fn refresh(&self, restaurant_id: i64) -> Result<Refreshed, CacheError> {
        let document = self.assembler.assemble(restaurant_id).await?;
        let bytes = document.to_json_bytes()?;

        let now = Utc::now();
        let key = snapshot_key(restaurant_id, now, next_snapshot_seq());

        if let Err(e) = self.store.put(&key, bytes).await {
            warn!(
                "Failed to store context snapshot for restaurant {}: {}",
                restaurant_id, e
            );
            return Ok(Refreshed {
                document,
                cache_key: None,
            });
        }

        let refreshed_at = now.format(REFRESHED_AT_FORMAT).to_string();
        if let Err(e) =
            restaurant::set_context_pointer(self.db.pool(), restaurant_id, &key, &refreshed_at)
                .await
        {
            warn!(
                "Failed to update context pointer for restaurant {}: {}",
                restaurant_id, e
            );
        }

        info!("Refreshed context for restaurant {} -> {}", restaurant_id, key);

        if let Some(keep) = self.retention {
            match self.prune_snapshots(restaurant_id, keep).await {
                Ok(0) => {}
                Ok(removed) => debug!(
                    "Pruned {} old snapshots for restaurant {}",
                    removed, restaurant_id
                ),
                Err(e) => warn!(
                    "Snapshot pruning failed for restaurant {}: {}",
                    restaurant_id, e
                ),
            }
        }

        Ok(Refreshed {
            document,
            cache_key: Some(key),
        })
    }

    /// Forget the restaurant's snapshot pointer. Stored snapshots are kept.
    pub async fn invalidate(&self, restaurant_id: i64) -> Result<(), CacheError> {
        restaurant::clear_context_pointer(self.db.pool(), restaurant_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    CacheError::NotFound(restaurant_id)
                } else {
                    CacheError::Database(e)
                }
            })?;

        info!("Invalidated context cache for restaurant {}", restaurant_id);
        Ok(())
    }

    /// Stored snapshot keys for a restaurant, oldest first.
    pub async fn snapshots(&self, restaurant_id: i64) -> Result<Vec<String>, CacheError> {
        Ok(self.store.list(&snapshot_prefix(restaurant_id)).await?)
    }

    /// Delete all but the newest `keep` snapshots, returning how many were
    /// removed. The snapshot the restaurant currently points at is never
    /// deleted.
    pub async fn prune_snapshots(
        &self,
        restaurant_id: i64,
        keep: usize,
    ) -> Result<usize, CacheError> {
        let keys = self.snapshots(restaurant_id).await?;
        let excess = keys.len().saturating_sub(keep);
        if excess == 0 {
            return Ok(0);
        }

        let pointer = restaurant::find_restaurant(self.db.pool(), restaurant_id)
            .await?
            .and_then(|r| r.cached_context_key);

        let mut removed = 0;
        for key in &keys[..excess] {
            if pointer.as_deref() == Some(key.as_str()) {
                continue;
            }
            self.store.delete(key).await?;
            removed += 1;
        }

        Ok(removed)
    }
}

fn snapshot_prefix(restaurant_id: i64) -> String {
    format!("restaurant_{}/", restaurant_id)
}

fn next_snapshot_seq() -> u64 {
    SNAPSHOT_SEQ.fetch_add(1, Ordering::Relaxed) % SNAPSHOT_SEQ_MODULUS
}

/// Blob key for a snapshot taken at `at`.
///
/// The fixed-width timestamp makes lexical key order chronological. The
/// sequence suffix keeps keys unique when two refreshes share a timestamp.
pub fn snapshot_key(restaurant_id: i64, at: DateTime<Utc>, seq: u64) -> String {
    format!(
        "{}{}-{:06}.json",
        snapshot_prefix(restaurant_id),
        at.format("%Y%m%d%H%M%S%6f"),
        seq % SNAPSHOT_SEQ_MODULUS
    )
}
