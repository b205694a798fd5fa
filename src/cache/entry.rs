//! Cache Entry Module
//!
//! Defines the stored document for a cache identifier, the lifetime requested
//! on save, and the metadata view returned to callers.

use serde::{Deserialize, Serialize};

// == Cache Entry ==
/// One stored document per cache identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Unique cache identifier
    pub id: String,
    /// Opaque payload, stored byte for byte
    pub data: Vec<u8>,
    /// Tag labels in insertion order
    pub tags: Vec<String>,
    /// Absolute expiry (Unix seconds), 0 = never expires
    pub expire_time: i64,
    /// Time of last write or touch (Unix seconds)
    #[serde(rename = "lastModified")]
    pub last_modified: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now` with the given lifetime in seconds.
    ///
    /// `None` and `Some(0)` both produce an entry that never expires.
    pub fn new(
        id: impl Into<String>,
        data: Vec<u8>,
        tags: Vec<String>,
        lifetime: Option<u64>,
        now: i64,
    ) -> Self {
        let expire_time = match lifetime {
            None | Some(0) => 0,
            Some(secs) => now.saturating_add(i64::try_from(secs).unwrap_or(i64::MAX)),
        };

        Self {
            id: id.into(),
            data,
            tags,
            expire_time,
            last_modified: now,
        }
    }

    // == Never Expires ==
    pub fn is_infinite(&self) -> bool {
        self.expire_time == 0
    }

    // == Metadata ==
    /// Returns the metadata view of this entry.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            expire: self.expire_time,
            tags: self.tags.clone(),
            mtime: self.last_modified,
        }
    }
}

// == Lifetime ==
/// Lifetime requested when saving an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifetime {
    /// Use the backend's configured default lifetime
    #[default]
    Default,
    /// Never expires
    Infinite,
    /// Expires this many seconds after the write.
    ///
    /// `Seconds(0)` does not produce an already-expired entry: a zero
    /// lifetime is treated as infinite, like `Infinite`.
    Seconds(u64),
}

impl Lifetime {
    /// Resolves to seconds (`None` = infinite) against the configured default.
    pub fn resolve(self, default_lifetime: Option<u64>) -> Option<u64> {
        match self {
            Lifetime::Default => default_lifetime,
            Lifetime::Infinite => None,
            Lifetime::Seconds(0) => None,
            Lifetime::Seconds(secs) => Some(secs),
        }
    }
}

// == Metadata ==
/// Expiry, tags and modification time of a stored entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Expiry timestamp, 0 = never expires
    pub expire: i64,
    /// Tags attached to the entry
    pub tags: Vec<String>,
    /// Last modification timestamp
    pub mtime: i64,
}

// == Utility Functions ==
/// Returns current Unix timestamp in seconds.
pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_entry_with_lifetime() {
        let entry = CacheEntry::new("a", b"payload".to_vec(), vec![], Some(60), NOW);

        assert_eq!(entry.expire_time, NOW + 60);
        assert_eq!(entry.last_modified, NOW);
        assert!(!entry.is_infinite());
    }

    #[test]
    fn test_entry_without_lifetime_never_expires() {
        let entry = CacheEntry::new("a", vec![], vec![], None, NOW);
        assert_eq!(entry.expire_time, 0);
        assert!(entry.is_infinite());
    }

    #[test]
    fn test_zero_lifetime_never_expires() {
        let entry = CacheEntry::new("a", vec![], vec![], Some(0), NOW);
        assert_eq!(entry.expire_time, 0);
    }

    #[test]
    fn test_lifetime_resolve() {
        assert_eq!(Lifetime::Default.resolve(Some(3600)), Some(3600));
        assert_eq!(Lifetime::Default.resolve(None), None);
        assert_eq!(Lifetime::Infinite.resolve(Some(3600)), None);
        assert_eq!(Lifetime::Seconds(0).resolve(Some(3600)), None);
        assert_eq!(Lifetime::Seconds(10).resolve(Some(3600)), Some(10));
    }

    #[test]
    fn test_metadata_view() {
        let entry = CacheEntry::new("a", vec![], vec!["x".to_string()], Some(5), NOW);
        let meta = entry.metadata();

        assert_eq!(meta.expire, NOW + 5);
        assert_eq!(meta.tags, vec!["x".to_string()]);
        assert_eq!(meta.mtime, NOW);
    }

    #[test]
    fn test_last_modified_serialized_name() {
        let entry = CacheEntry::new("a", vec![], vec![], None, NOW);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["lastModified"], NOW);
        assert_eq!(json["expire_time"], 0);
    }
}
