//! Validity & Expiration
//!
//! Expiry rules expressed as storage filters, so stores apply them in the
//! query instead of the cache filtering fetched entries.

use crate::storage::{Bound, Filter};

/// Entries readable at `now`: never expiring, or expiring at or after `now`.
pub fn valid_at(now: i64) -> Filter {
    Filter::Or(vec![
        Filter::ExpireTime(Bound::Eq(0)),
        Filter::ExpireTime(Bound::Gte(now)),
    ])
}

/// Entries strictly expired at `now`. Infinite entries never match.
pub fn expired_at(now: i64) -> Filter {
    Filter::And(vec![
        Filter::ExpireTime(Bound::Gt(0)),
        Filter::ExpireTime(Bound::Lt(now)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;

    const NOW: i64 = 1_700_000_000;

    fn expiring_at(expire_time: i64) -> CacheEntry {
        CacheEntry {
            id: "e".to_string(),
            data: Vec::new(),
            tags: Vec::new(),
            expire_time,
            last_modified: NOW,
        }
    }

    #[test]
    fn test_infinite_entry_always_valid() {
        let entry = expiring_at(0);
        assert!(valid_at(NOW).matches(&entry));
        assert!(valid_at(i64::MAX).matches(&entry));
        assert!(!expired_at(i64::MAX).matches(&entry));
    }

    #[test]
    fn test_valid_boundary_is_inclusive() {
        assert!(valid_at(NOW).matches(&expiring_at(NOW)));
        assert!(valid_at(NOW).matches(&expiring_at(NOW + 1)));
        assert!(!valid_at(NOW).matches(&expiring_at(NOW - 1)));
    }

    #[test]
    fn test_expired_boundary_is_strict() {
        assert!(!expired_at(NOW).matches(&expiring_at(NOW)));
        assert!(expired_at(NOW).matches(&expiring_at(NOW - 1)));
        assert!(!expired_at(NOW).matches(&expiring_at(NOW + 1)));
    }

    #[test]
    fn test_valid_and_expired_partition_positive_expiries() {
        for expire_time in [NOW - 2, NOW - 1, NOW + 1, NOW + 2] {
            let entry = expiring_at(expire_time);
            assert_ne!(valid_at(NOW).matches(&entry), expired_at(NOW).matches(&entry));
        }
    }
}
