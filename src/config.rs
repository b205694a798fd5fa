//! Configuration Module
//!
//! Handles loading and managing backend configuration from environment variables.

use std::env;

/// Default connection target, served by the bundled in-memory store.
pub const DEFAULT_SERVER: &str = "memory://";

/// Default database name.
pub const DEFAULT_DATABASE: &str = "cache";

/// Backend configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Document store connection target
    pub server: String,
    /// Database holding the cache collection
    pub database: String,
    /// Default lifetime in seconds for entries saved without one (0 = infinite)
    pub default_lifetime: u64,
    /// Compaction runs with probability 1/N after a removal (0 = never)
    pub automatic_vacuum_factor: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Expired-entry sweep interval in seconds (0 = disabled)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SERVER` - Connection target (default: memory://)
    /// - `CACHE_DATABASE` - Database name (default: cache)
    /// - `DEFAULT_LIFETIME` - Default lifetime in seconds (default: 3600)
    /// - `AUTOMATIC_VACUUM_FACTOR` - Compaction factor (default: 0)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: env::var("CACHE_SERVER").unwrap_or(defaults.server),
            database: env::var("CACHE_DATABASE").unwrap_or(defaults.database),
            default_lifetime: env::var("DEFAULT_LIFETIME")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_lifetime),
            automatic_vacuum_factor: env::var("AUTOMATIC_VACUUM_FACTOR")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.automatic_vacuum_factor),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Default lifetime as used by `save`: `None` means infinite.
    pub fn default_lifetime(&self) -> Option<u64> {
        match self.default_lifetime {
            0 => None,
            secs => Some(secs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            default_lifetime: 3600,
            automatic_vacuum_factor: 0,
            server_port: 3000,
            cleanup_interval: 60,
        }
    }
}
