//! Response DTOs for the cache backend API
//!
//! Defines the structure of outgoing JSON response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, CleanMode};

/// Response body for the save operation (PUT /entries/:id)
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// Success message
    pub message: String,
    /// The id that was saved
    pub id: String,
}

impl SaveResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Entry '{}' saved successfully", id),
            id,
        }
    }
}

/// Response body for the remove operation (DELETE /entries/:id)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Success message
    pub message: String,
    /// The id that was removed
    pub id: String,
}

impl RemoveResponse {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            message: format!("Entry '{}' removed", id),
            id,
        }
    }
}

/// Response body for the test operation (GET /entries/:id/test)
#[derive(Debug, Clone, Serialize)]
pub struct TestResponse {
    pub id: String,
    /// Whether a readable entry exists
    pub available: bool,
}

/// Response body for the touch operation (POST /entries/:id/touch)
#[derive(Debug, Clone, Serialize)]
pub struct TouchResponse {
    pub id: String,
    /// Seconds that were added
    pub extra_lifetime: u64,
}

/// Response body for the clean operation (POST /clean)
#[derive(Debug, Clone, Serialize)]
pub struct CleanResponse {
    pub mode: CleanMode,
    /// False if any individual removal failed
    pub success: bool,
}

/// Response body for id listings
#[derive(Debug, Clone, Serialize)]
pub struct IdsResponse {
    pub ids: Vec<String>,
}

/// Response body for the tag listing (GET /tags)
#[derive(Debug, Clone, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

/// Response body for GET /filling
///
/// The value is a fixed placeholder, not a measurement.
#[derive(Debug, Clone, Serialize)]
pub struct FillingResponse {
    pub percentage: u8,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats) -> Self {
        let hit_rate = stats.hit_rate();
        Self { stats, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
