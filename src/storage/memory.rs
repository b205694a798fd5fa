//! In-memory Document Store
//!
//! Process-local `DocumentStore` used for the `memory://` target and in tests.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{DocumentStore, EntryUpdate, Filter};
use crate::cache::CacheEntry;
use crate::error::Result;

// == Memory Store ==
/// Document collection held in a map keyed by id, which enforces uniqueness.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Database name, kept for logging
    database: String,
    /// Documents by id
    documents: RwLock<BTreeMap<String, CacheEntry>>,
    /// Number of completed compactions
    compactions: AtomicU64,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            documents: RwLock::new(BTreeMap::new()),
            compactions: AtomicU64::new(0),
        }
    }

    /// Returns the number of compactions run so far.
    pub fn compaction_count(&self) -> u64 {
        self.compactions.load(Ordering::Relaxed)
    }

    /// Returns the number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(&self, filter: &Filter) -> Result<Option<CacheEntry>> {
        let documents = self.documents.read().await;

        // Point lookups skip the scan
        if let Some(id) = filter.target_id() {
            return Ok(documents.get(id).filter(|doc| filter.matches(doc)).cloned());
        }

        Ok(documents.values().find(|doc| filter.matches(doc)).cloned())
    }

    async fn find_ids(&self, filter: &Filter) -> Result<Vec<String>> {
        let documents = self.documents.read().await;
        Ok(documents
            .values()
            .filter(|doc| filter.matches(doc))
            .map(|doc| doc.id.clone())
            .collect())
    }

    async fn upsert(&self, entry: CacheEntry) -> Result<bool> {
        let mut documents = self.documents.write().await;
        Ok(documents.insert(entry.id.clone(), entry).is_some())
    }

    async fn remove(&self, filter: &Filter) -> Result<u64> {
        let mut documents = self.documents.write().await;
        let before = documents.len();

        match filter {
            Filter::All => documents.clear(),
            Filter::Id(id) => {
                documents.remove(id);
            }
            _ => documents.retain(|_, doc| !filter.matches(doc)),
        }

        Ok((before - documents.len()) as u64)
    }

    async fn update(&self, filter: &Filter, update: EntryUpdate) -> Result<u64> {
        let mut documents = self.documents.write().await;
        let mut matched = 0;

        for doc in documents.values_mut().filter(|doc| filter.matches(doc)) {
            if let Some(expire_time) = update.expire_time {
                doc.expire_time = expire_time;
            }
            if let Some(last_modified) = update.last_modified {
                doc.last_modified = last_modified;
            }
            matched += 1;
        }

        Ok(matched)
    }

    async fn distinct_tags(&self) -> Result<Vec<String>> {
        let documents = self.documents.read().await;
        let tags: BTreeSet<&String> = documents.values().flat_map(|doc| doc.tags.iter()).collect();
        Ok(tags.into_iter().cloned().collect())
    }

    async fn compact(&self) -> Result<()> {
        // BTreeMap has no spare capacity to release; compaction only records the call
        let count = self.compactions.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Compacted database '{}' (run {})", self.database, count);
        Ok(())
    }
}
