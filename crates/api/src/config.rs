//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use blob_store::{BlobError, BlobStore, LocalBlobStore, MemoryBlobStore};

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATABASE_URL: &str = "sqlite:restaurant_chatbot.db?mode=rwc";
const DEFAULT_BLOB_STORE_DIR: &str = "data/context-snapshots";

/// Where context snapshots are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobBackend {
    /// In process; snapshots are lost on restart.
    Memory,
    /// Files under a directory.
    Local(PathBuf),
}

impl BlobBackend {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "memory" => BlobBackend::Memory,
            dir => BlobBackend::Local(PathBuf::from(dir)),
        }
    }

    /// Open the configured store.
    pub async fn open(&self) -> Result<Arc<dyn BlobStore>, BlobError> {
        Ok(match self {
            BlobBackend::Memory => Arc::new(MemoryBlobStore::new()),
            BlobBackend::Local(dir) => Arc::new(LocalBlobStore::open(dir.clone()).await?),
        })
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Context snapshot storage.
    pub blob_store: BlobBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `API_ADDR` | Server bind address | `127.0.0.1:5000` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:restaurant_chatbot.db?mode=rwc` |
    /// | `BLOB_STORE_DIR` | Snapshot directory, or `memory` | `data/context-snapshots` |
    ///
    /// Completion settings are read separately by `ChatSettings::from_env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("API_ADDR")
            .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let blob_store = BlobBackend::parse(
            &env::var("BLOB_STORE_DIR").unwrap_or_else(|_| DEFAULT_BLOB_STORE_DIR.to_string()),
        );

        Ok(Self {
            addr,
            database_url,
            blob_store,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_ADDR format")]
    InvalidAddr,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        env::remove_var("API_ADDR");
        env::remove_var("DATABASE_URL");
        env::remove_var("BLOB_STORE_DIR");

        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(
            config.blob_store,
            BlobBackend::Local(PathBuf::from(DEFAULT_BLOB_STORE_DIR))
        );

        env::set_var("BLOB_STORE_DIR", "memory");
        env::set_var("API_ADDR", "0.0.0.0:8080");
        let config = Config::from_env().unwrap();
        assert_eq!(config.blob_store, BlobBackend::Memory);
        assert_eq!(config.addr.port(), 8080);

        env::set_var("API_ADDR", "not an address");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        env::remove_var("API_ADDR");
        env::remove_var("BLOB_STORE_DIR");
    }
}
