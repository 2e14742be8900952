//! Filesystem-backed blob store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

use crate::{validate_key, BlobError, BlobStore};

/// Suffix marker for in-flight writes; such files are never listed.
const TEMP_MARKER: &str = ".tmp-";

/// Blob store that maps each key to a file below a root directory.
///
/// Writes go to a temporary sibling file that is then renamed into place,
/// so readers never observe a partially written blob.
#[derive(Debug)]
pub struct LocalBlobStore {
    root: PathBuf,
    write_seq: AtomicU64,
}

impl LocalBlobStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        debug!("Blob store opened at {}", root.display());
        Ok(Self {
            root,
            write_seq: AtomicU64::new(0),
        })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, BlobError> {
        validate_key(key)?;
        Ok(key.split('/').fold(self.root.clone(), |path, segment| path.join(segment)))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let seq = self.write_seq.fetch_add(1, Ordering::Relaxed);
        let mut temp = path.clone().into_os_string();
        temp.push(format!("{}{}-{}", TEMP_MARKER, std::process::id(), seq));
        let temp = PathBuf::from(temp);

        fs::write(&temp, &data).await?;
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!("Stored blob {} ({} bytes)", key, data.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.path_for(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BlobError::NotFound(key.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, BlobError> {
        let root = self.root.clone();
        let prefix = prefix.to_string();

        tokio::task::spawn_blocking(move || {
            let mut keys = Vec::new();
            for entry in WalkDir::new(&root).into_iter().filter_map(Result::ok) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(key) = key_for(&root, entry.path()) else {
                    continue;
                };
                if key.contains(TEMP_MARKER) || !key.starts_with(&prefix) {
                    continue;
                }
                keys.push(key);
            }
            keys.sort();
            keys
        })
        .await
        .map_err(|e| BlobError::Unavailable(format!("listing task failed: {}", e)))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted blob {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Convert a file path below `root` back into a slash-separated key.
fn key_for(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Option<Vec<&str>> = relative
        .components()
        .map(|component| component.as_os_str().to_str())
        .collect();
    let segments = segments?;
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("/"))
}
