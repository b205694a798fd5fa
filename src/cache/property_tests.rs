//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check CacheStore against simple set models.

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::sync::Arc;

use crate::cache::{unix_now, CacheEntry, CacheStore, CleanMode, Lifetime};
use crate::storage::{DocumentStore, MemoryStore};

// == Test Configuration ==
const TEST_DEFAULT_LIFETIME: Option<u64> = Some(3600);

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn new_cache(factor: u32) -> (Arc<MemoryStore>, CacheStore) {
    let memory = Arc::new(MemoryStore::new("cache"));
    let cache = CacheStore::new(memory.clone(), TEST_DEFAULT_LIFETIME, factor);
    (memory, cache)
}

// == Strategies ==
/// Generates valid cache ids
fn valid_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}".prop_map(|s| s)
}

/// Generates arbitrary payload bytes, including invalid UTF-8
fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

/// Generates tag lists over a small alphabet so selections overlap
fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d"]), 0..4)
        .prop_map(|tags| tags.into_iter().map(String::from).collect())
}

/// Generates entries with distinct ids and random tags
fn tagged_entries_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(valid_id_strategy(), tags_strategy(), 0..20)
}

/// Expiry offsets relative to now; `None` = never expires
fn expiry_strategy() -> impl Strategy<Value = Option<i64>> {
    prop_oneof![
        Just(None),
        (-10_000i64..-1).prop_map(Some),
        (1i64..10_000).prop_map(Some),
    ]
}

async fn seed_tagged(memory: &MemoryStore, entries: &BTreeMap<String, Vec<String>>) {
    for (id, tags) in entries {
        let entry = CacheEntry::new(id.clone(), Vec::new(), tags.clone(), None, unix_now());
        memory.upsert(entry).await.unwrap();
    }
}

fn model_ids<F>(entries: &BTreeMap<String, Vec<String>>, keep: F) -> BTreeSet<String>
where
    F: Fn(&BTreeSet<&str>) -> bool,
{
    entries
        .iter()
        .filter(|(_, tags)| {
            let tags: BTreeSet<&str> = tags.iter().map(String::as_str).collect();
            keep(&tags)
        })
        .map(|(id, _)| id.clone())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Saving and then loading returns the exact bytes saved.
    #[test]
    fn prop_roundtrip_storage(id in valid_id_strategy(), data in payload_strategy()) {
        let (_, cache) = new_cache(0);

        let loaded = block_on(async {
            cache.save(data.clone(), &id, Vec::new(), Lifetime::Default).await.unwrap();
            cache.load(&id, false).await.unwrap()
        });

        prop_assert_eq!(loaded, Some(data), "Round-trip payload mismatch");
    }

    // A second save under the same id replaces the first.
    #[test]
    fn prop_overwrite_semantics(
        id in valid_id_strategy(),
        first in payload_strategy(),
        second in payload_strategy(),
        tags in tags_strategy()
    ) {
        let (memory, cache) = new_cache(0);

        let (loaded, count, meta) = block_on(async {
            cache.save(first, &id, Vec::new(), Lifetime::Default).await.unwrap();
            cache.save(second.clone(), &id, tags.clone(), Lifetime::Infinite).await.unwrap();
            (
                cache.load(&id, false).await.unwrap(),
                memory.len().await,
                cache.get_metadatas(&id).await.unwrap(),
            )
        });

        prop_assert_eq!(loaded, Some(second), "Overwrite should return new payload");
        prop_assert_eq!(count, 1, "Should have exactly one entry after overwrite");
        prop_assert_eq!(meta.map(|m| m.tags), Some(tags));
    }

    // After remove, load finds nothing.
    #[test]
    fn prop_remove_removes_entry(id in valid_id_strategy(), data in payload_strategy()) {
        let (_, cache) = new_cache(0);

        let (before, after) = block_on(async {
            cache.save(data, &id, Vec::new(), Lifetime::Default).await.unwrap();
            let before = cache.test(&id).await.unwrap();
            cache.remove(&id).await.unwrap();
            (before, cache.load(&id, false).await.unwrap())
        });

        prop_assert!(before, "Entry should exist before remove");
        prop_assert!(after.is_none(), "Entry should not exist after remove");
    }

    // Tag selections agree with superset / any / none set semantics.
    #[test]
    fn prop_tag_selections_match_set_model(
        entries in tagged_entries_strategy(),
        query in tags_strategy()
    ) {
        let (memory, cache) = new_cache(0);

        let (matching, any, not_matching) = block_on(async {
            seed_tagged(&memory, &entries).await;
            (
                cache.get_ids_matching_tags(&query).await.unwrap(),
                cache.get_ids_matching_any_tags(&query).await.unwrap(),
                cache.get_ids_not_matching_tags(&query).await.unwrap(),
            )
        });

        let expected_matching = model_ids(&entries, |tags| query.iter().all(|q| tags.contains(q.as_str())));
        let expected_any = model_ids(&entries, |tags| query.iter().any(|q| tags.contains(q.as_str())));
        let expected_not = model_ids(&entries, |tags| !query.iter().any(|q| tags.contains(q.as_str())));

        prop_assert_eq!(matching.into_iter().collect::<BTreeSet<_>>(), expected_matching);
        prop_assert_eq!(any.into_iter().collect::<BTreeSet<_>>(), expected_any.clone());
        prop_assert_eq!(not_matching.into_iter().collect::<BTreeSet<_>>(), expected_not.clone());

        // "any" and "none" partition the collection
        prop_assert_eq!(expected_any.len() + expected_not.len(), entries.len());
    }

    // Tag clean removes exactly the selected ids.
    #[test]
    fn prop_clean_matching_any_tag(
        entries in tagged_entries_strategy(),
        query in tags_strategy()
    ) {
        let (memory, cache) = new_cache(0);

        let (ok, remaining) = block_on(async {
            seed_tagged(&memory, &entries).await;
            let ok = cache.clean(CleanMode::MatchingAnyTag, &query).await.unwrap();
            (ok, cache.get_ids().await.unwrap())
        });

        let expected = model_ids(&entries, |tags| !query.iter().any(|q| tags.contains(q.as_str())));
        prop_assert!(ok);
        prop_assert_eq!(remaining.into_iter().collect::<BTreeSet<_>>(), expected);
    }

    // clean(Old) removes exactly the entries with 0 < expire_time < now.
    #[test]
    fn prop_clean_old_removes_only_expired(
        expiries in prop::collection::btree_map(valid_id_strategy(), expiry_strategy(), 0..20)
    ) {
        let (memory, cache) = new_cache(0);

        let remaining = block_on(async {
            let now = unix_now();
            for (id, offset) in &expiries {
                let entry = CacheEntry {
                    id: id.clone(),
                    data: Vec::new(),
                    tags: Vec::new(),
                    expire_time: offset.map_or(0, |o| now + o),
                    last_modified: now,
                };
                memory.upsert(entry).await.unwrap();
            }
            cache.clean(CleanMode::Old, &[]).await.unwrap();
            cache.get_ids().await.unwrap()
        });

        let expected: BTreeSet<String> = expiries
            .iter()
            .filter(|(_, offset)| offset.map_or(true, |o| o > 0))
            .map(|(id, _)| id.clone())
            .collect();
        prop_assert_eq!(remaining.into_iter().collect::<BTreeSet<_>>(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Factor 1 compacts once per remove; factor 0 never compacts.
    #[test]
    fn prop_vacuum_call_counts(ids in prop::collection::vec(valid_id_strategy(), 1..30)) {
        let (always_memory, always) = new_cache(1);
        let (never_memory, never) = new_cache(0);

        block_on(async {
            for id in &ids {
                always.remove(id).await.unwrap();
                never.remove(id).await.unwrap();
            }
        });

        prop_assert_eq!(always_memory.compaction_count(), ids.len() as u64);
        prop_assert_eq!(never_memory.compaction_count(), 0);
    }
}
