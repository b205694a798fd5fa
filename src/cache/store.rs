//! Cache Store Module
//!
//! Cache backend operations over a shared document store: validity-checked
//! reads, replace-on-write saves, tag-driven invalidation and automatic vacuum.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::capabilities::{Capabilities, FILLING_PERCENTAGE};
use crate::cache::entry::{unix_now, CacheEntry, Lifetime, Metadata};
use crate::cache::stats::{CacheStats, StatsRecorder};
use crate::cache::tags::{CleanMode, TagSelector};
use crate::cache::vacuum::Vacuum;
use crate::cache::validity::{expired_at, valid_at};
use crate::config::Config;
use crate::error::Result;
use crate::storage::{self, DocumentStore, EntryUpdate, Filter};

// == Cache Store ==
/// Cache backend over a [`DocumentStore`].
///
/// Holds no locks of its own: every operation is a translation into store
/// queries, and concurrent callers rely on the store's per-document atomicity.
/// A tag-based `clean` selects ids first and removes them one by one, so an
/// entry tagged after the selection survives.
pub struct CacheStore {
    /// Backing document collection
    store: Arc<dyn DocumentStore>,
    /// Lifetime in seconds for `Lifetime::Default`, `None` = infinite
    default_lifetime: Option<u64>,
    /// Compaction trigger run after removals
    vacuum: Vacuum,
    /// Operation counters
    stats: StatsRecorder,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a CacheStore over an opened document store.
    ///
    /// # Arguments
    /// * `store` - Backing document collection
    /// * `default_lifetime` - Seconds for `Lifetime::Default` saves (`None` = infinite)
    /// * `automatic_vacuum_factor` - Compaction probability 1/N after removals (0 = never)
    pub fn new(
        store: Arc<dyn DocumentStore>,
        default_lifetime: Option<u64>,
        automatic_vacuum_factor: u32,
    ) -> Self {
        Self {
            store,
            default_lifetime,
            vacuum: Vacuum::new(automatic_vacuum_factor),
            stats: StatsRecorder::new(),
        }
    }

    /// Opens the configured document store and wraps it.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = storage::open(config)?;
        Ok(Self::new(
            store,
            config.default_lifetime(),
            config.automatic_vacuum_factor,
        ))
    }

    // == Load ==
    /// Returns the payload stored for `id`.
    ///
    /// Expired entries are filtered out by the store query unless
    /// `skip_validity_check` is set. `None` means no readable entry.
    pub async fn load(&self, id: &str, skip_validity_check: bool) -> Result<Option<Vec<u8>>> {
        let filter = if skip_validity_check {
            Filter::Id(id.to_string())
        } else {
            Filter::And(vec![Filter::Id(id.to_string()), valid_at(unix_now())])
        };

        let found = self.store.find_one(&filter).await?;
        match found {
            Some(entry) => {
                self.stats.record_hit();
                Ok(Some(entry.data))
            }
            None => {
                debug!("Cache miss for '{}'", id);
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Test ==
    /// Returns true if `load(id, false)` would return data.
    pub async fn test(&self, id: &str) -> Result<bool> {
        Ok(self.load(id, false).await?.is_some())
    }

    // == Save ==
    /// Stores `data` under `id`, replacing any previous entry entirely.
    ///
    /// The write is a single upsert, so readers never observe the id missing
    /// while it is replaced. `Lifetime::Seconds(0)` stores an entry that never
    /// expires.
    pub async fn save(
        &self,
        data: Vec<u8>,
        id: &str,
        tags: Vec<String>,
        lifetime: Lifetime,
    ) -> Result<()> {
        let lifetime = lifetime.resolve(self.default_lifetime);
        let entry = CacheEntry::new(id, data, tags, lifetime, unix_now());

        let replaced = self.store.upsert(entry).await?;
        self.stats.record_write();
        if replaced {
            self.stats.record_removals(1);
        }
        debug!("Saved '{}' (replaced: {})", id, replaced);

        self.vacuum.after_removal(self.store.as_ref(), &self.stats).await;
        Ok(())
    }

    // == Remove ==
    /// Removes the entry for `id`. Removing an absent id succeeds.
    pub async fn remove(&self, id: &str) -> Result<()> {
        let removed = self.store.remove(&Filter::Id(id.to_string())).await?;
        self.stats.record_removals(removed);

        self.vacuum.after_removal(self.store.as_ref(), &self.stats).await;
        Ok(())
    }

    // == Clean ==
    /// Removes entries selected by `mode`.
    ///
    /// `tags` is only used by the tag modes, which remove matching ids one at
    /// a time and return false if any single removal failed.
    pub async fn clean(&self, mode: CleanMode, tags: &[String]) -> Result<bool> {
        if let Some(selector) = mode.tag_selector() {
            return self.clean_by_tags(selector, tags).await;
        }

        let filter = match mode {
            CleanMode::Old => expired_at(unix_now()),
            _ => Filter::All,
        };

        let removed = self.store.remove(&filter).await?;
        self.stats.record_removals(removed);
        if removed > 0 {
            info!("Clean {:?}: removed {} entries", mode, removed);
        } else {
            debug!("Clean {:?}: nothing to remove", mode);
        }

        self.vacuum.after_removal(self.store.as_ref(), &self.stats).await;
        Ok(true)
    }

    async fn clean_by_tags(&self, selector: TagSelector, tags: &[String]) -> Result<bool> {
        let ids = self.store.find_ids(&selector.filter(tags)).await?;
        let mut all_removed = true;

        for id in &ids {
            if let Err(e) = self.remove(id).await {
                warn!("Failed to remove '{}' during tag clean: {}", id, e);
                all_removed = false;
            }
        }

        info!(
            "Clean {:?} {:?}: {} entries selected",
            selector,
            tags,
            ids.len()
        );
        Ok(all_removed)
    }

    // == Listing ==
    /// Returns every stored id.
    pub async fn get_ids(&self) -> Result<Vec<String>> {
        self.store.find_ids(&Filter::All).await
    }

    /// Returns every distinct tag in use.
    pub async fn get_tags(&self) -> Result<Vec<String>> {
        self.store.distinct_tags().await
    }

    /// Returns ids of entries carrying all of `tags`.
    pub async fn get_ids_matching_tags(&self, tags: &[String]) -> Result<Vec<String>> {
        self.select_ids(TagSelector::Matching, tags).await
    }

    /// Returns ids of entries carrying none of `tags`.
    pub async fn get_ids_not_matching_tags(&self, tags: &[String]) -> Result<Vec<String>> {
        self.select_ids(TagSelector::NotMatching, tags).await
    }

    /// Returns ids of entries carrying at least one of `tags`.
    pub async fn get_ids_matching_any_tags(&self, tags: &[String]) -> Result<Vec<String>> {
        self.select_ids(TagSelector::MatchingAny, tags).await
    }

    async fn select_ids(&self, selector: TagSelector, tags: &[String]) -> Result<Vec<String>> {
        self.store.find_ids(&selector.filter(tags)).await
    }

    // == Metadata ==
    /// Returns expiry, tags and mtime for `id`, regardless of validity.
    pub async fn get_metadatas(&self, id: &str) -> Result<Option<Metadata>> {
        let found = self.store.find_one(&Filter::Id(id.to_string())).await?;
        Ok(found.map(|entry| entry.metadata()))
    }

    // == Touch ==
    /// Extends the lifetime of `id` by `extra_lifetime` seconds.
    ///
    /// Entries that never expire stay that way; only their mtime moves.
    /// Returns false if no entry exists for `id`.
    pub async fn touch(&self, id: &str, extra_lifetime: u64) -> Result<bool> {
        let filter = Filter::Id(id.to_string());
        let Some(entry) = self.store.find_one(&filter).await? else {
            return Ok(false);
        };

        let expire_time = if entry.is_infinite() {
            0
        } else {
            let extra = i64::try_from(extra_lifetime).unwrap_or(i64::MAX);
            entry.expire_time.saturating_add(extra)
        };

        let update = EntryUpdate {
            expire_time: Some(expire_time),
            last_modified: Some(unix_now()),
        };
        let matched = self.store.update(&filter, update).await?;
        Ok(matched > 0)
    }

    // == Accessors ==
    pub fn get_capabilities(&self) -> Capabilities {
        Capabilities::backend()
    }

    /// Placeholder fill level; see [`FILLING_PERCENTAGE`].
    pub fn get_filling_percentage(&self) -> u8 {
        FILLING_PERCENTAGE
    }

    /// Returns current operation counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
