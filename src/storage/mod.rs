//! Storage Module
//!
//! The document-store seam the cache is built on. A store holds one document
//! per cache identifier and answers queries expressed as [`Filter`] values.

mod filter;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cache::CacheEntry;
use crate::config::Config;
use crate::error::{CacheError, Result};

pub use filter::{Bound, Filter, TagMatch};
pub use memory::MemoryStore;

// == Entry Update ==
/// Field assignments applied in place by [`DocumentStore::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryUpdate {
    pub expire_time: Option<i64>,
    pub last_modified: Option<i64>,
}

// == Document Store ==
/// Collection of cache documents, unique on `id`.
///
/// Implementations provide per-document atomicity; callers add no locking.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns one entry matching the filter.
    async fn find_one(&self, filter: &Filter) -> Result<Option<CacheEntry>>;

    /// Returns the ids of all entries matching the filter.
    async fn find_ids(&self, filter: &Filter) -> Result<Vec<String>>;

    /// Inserts the entry, atomically replacing any entry with the same id.
    ///
    /// Returns true when a previous entry was replaced.
    async fn upsert(&self, entry: CacheEntry) -> Result<bool>;

    /// Removes every entry matching the filter, returning how many were removed.
    async fn remove(&self, filter: &Filter) -> Result<u64>;

    /// Applies the update to every matching entry, returning the match count.
    async fn update(&self, filter: &Filter, update: EntryUpdate) -> Result<u64>;

    /// Returns the distinct tag values across all entries.
    async fn distinct_tags(&self) -> Result<Vec<String>>;

    /// Compacts the underlying storage.
    async fn compact(&self) -> Result<()>;
}

// == Open ==
/// Opens the document store named by the configured connection target.
pub fn open(config: &Config) -> Result<Arc<dyn DocumentStore>> {
    let scheme = config
        .server
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .ok_or_else(|| {
            CacheError::Configuration(format!(
                "Connection target '{}' has no scheme",
                config.server
            ))
        })?;

    match scheme {
        "memory" => {
            info!("Opening in-memory document store, database '{}'", config.database);
            Ok(Arc::new(MemoryStore::new(config.database.clone())))
        }
        other => Err(CacheError::Configuration(format!(
            "No document store driver available for scheme '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory_store() {
        let config = Config::default();
        assert!(open(&config).is_ok());
    }

    #[test]
    fn test_open_unknown_driver_is_configuration_error() {
        let config = Config {
            server: "mongodb://localhost:27017".to_string(),
            ..Config::default()
        };
        assert!(matches!(open(&config), Err(CacheError::Configuration(_))));
    }

    #[test]
    fn test_open_without_scheme() {
        let config = Config {
            server: "localhost".to_string(),
            ..Config::default()
        };
        assert!(matches!(open(&config), Err(CacheError::Configuration(_))));
    }
}
