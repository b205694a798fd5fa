//! Backend Capabilities

use serde::Serialize;

/// Value reported by `get_filling_percentage`.
///
/// The backend cannot measure how full the document store is, so this is a
/// fixed placeholder rather than a metric.
pub const FILLING_PERCENTAGE: u8 = 1;

// == Capabilities ==
/// Features this backend offers to the cache framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Expired entries need explicit cleaning
    pub automatic_cleaning: bool,
    /// Tags are supported
    pub tags: bool,
    /// Expired entries can be read with the validity check skipped
    pub expired_read: bool,
    /// Save priorities are honoured
    pub priority: bool,
    /// Entries may never expire
    pub infinite_lifetime: bool,
    /// Ids and tags can be listed
    pub get_list: bool,
}

impl Capabilities {
    pub const fn backend() -> Self {
        Self {
            automatic_cleaning: true,
            tags: true,
            expired_read: true,
            priority: false,
            infinite_lifetime: true,
            get_list: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_capabilities() {
        let caps = Capabilities::backend();
        assert!(caps.automatic_cleaning);
        assert!(caps.tags);
        assert!(caps.expired_read);
        assert!(!caps.priority);
        assert!(caps.infinite_lifetime);
        assert!(caps.get_list);
    }
}
