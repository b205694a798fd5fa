//! Tagged Cache - A cache backend over a document store
//!
//! Stores opaque payloads by id with time-based expiration, tag-driven
//! invalidation and probabilistic storage compaction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
