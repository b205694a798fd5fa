//! Cache Module
//!
//! Tagged cache backend with time-based expiration, tag-driven invalidation
//! and automatic vacuum over a pluggable document store.

mod capabilities;
mod entry;
mod stats;
mod store;
mod tags;
mod vacuum;
mod validity;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use capabilities::{Capabilities, FILLING_PERCENTAGE};
pub use entry::{unix_now, CacheEntry, Lifetime, Metadata};
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
pub use tags::{CleanMode, TagSelector};
pub use vacuum::Vacuum;
pub use validity::{expired_at, valid_at};

// == Public Constants ==
/// Maximum allowed id length in bytes
pub const MAX_ID_LENGTH: usize = 250;

/// Maximum allowed tag length in bytes
pub const MAX_TAG_LENGTH: usize = 250;
