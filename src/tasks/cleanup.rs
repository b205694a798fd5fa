//! Expired Entry Sweep
//!
//! Background task that periodically runs `clean(Old)` on the cache.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, CleanMode};

/// Spawns a background task that periodically removes expired entries.
///
/// The task sleeps for the given interval between sweeps. A failed sweep is
/// logged and retried on the next tick.
///
/// # Arguments
/// * `cache` - Shared cache backend
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(CacheStore::from_config(&config)?);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: Arc<CacheStore>, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expired entry sweep with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            match cache.clean(CleanMode::Old, &[]).await {
                Ok(_) => debug!("Expired entry sweep completed"),
                Err(e) => warn!("Expired entry sweep failed: {}", e),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{unix_now, CacheEntry, Lifetime};
    use crate::storage::{DocumentStore, MemoryStore};

    fn new_cache() -> (Arc<MemoryStore>, Arc<CacheStore>) {
        let memory = Arc::new(MemoryStore::new("cache"));
        let cache = Arc::new(CacheStore::new(memory.clone(), Some(300), 0));
        (memory, cache)
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let (memory, cache) = new_cache();

        memory
            .upsert(CacheEntry {
                id: "expired".to_string(),
                data: b"value".to_vec(),
                tags: Vec::new(),
                expire_time: unix_now() - 10,
                last_modified: unix_now() - 20,
            })
            .await
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);

        // Wait for the sweep to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        let still_stored = cache.load("expired", true).await.unwrap();
        assert!(still_stored.is_none(), "Expired entry should have been swept");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let (_, cache) = new_cache();

        cache
            .save(b"value".to_vec(), "long_lived", vec![], Lifetime::Seconds(3600))
            .await
            .unwrap();
        cache
            .save(b"value".to_vec(), "forever", vec![], Lifetime::Infinite)
            .await
            .unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.test("long_lived").await.unwrap(), "Valid entry should not be removed");
        assert!(cache.test("forever").await.unwrap(), "Infinite entry should not be removed");

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let (_, cache) = new_cache();

        let handle = spawn_cleanup_task(cache, 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
