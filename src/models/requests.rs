//! Request DTOs for the cache backend API
//!
//! Defines query strings and JSON bodies accepted by the HTTP layer.

use serde::Deserialize;

use crate::cache::{CleanMode, Lifetime, MAX_ID_LENGTH, MAX_TAG_LENGTH};

/// Query string for the save operation (PUT /entries/:id)
///
/// # Fields
/// - `tags`: Comma-separated tag list
/// - `lifetime`: Seconds, or `infinite`; the configured default if absent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveQuery {
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub lifetime: Option<String>,
}

impl SaveQuery {
    /// Parses the requested lifetime.
    pub fn lifetime(&self) -> Result<Lifetime, String> {
        match self.lifetime.as_deref() {
            None => Ok(Lifetime::Default),
            Some("infinite") => Ok(Lifetime::Infinite),
            Some(value) => value
                .parse()
                .map(Lifetime::Seconds)
                .map_err(|_| format!("Invalid lifetime '{}'", value)),
        }
    }

    /// Parses and validates the tag list.
    pub fn tags(&self) -> Result<Vec<String>, String> {
        let tags = split_tags(self.tags.as_deref());
        match validate_tags(&tags) {
            Some(error) => Err(error),
            None => Ok(tags),
        }
    }
}

/// Query string for the load operation (GET /entries/:id)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadQuery {
    /// Return the payload even if the entry has expired
    #[serde(default)]
    pub skip_validity: bool,
}

/// Query string for tag selections (GET /ids/matching and friends)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagsQuery {
    /// Comma-separated tag list
    #[serde(default)]
    pub tags: Option<String>,
}

impl TagsQuery {
    pub fn tags(&self) -> Vec<String> {
        split_tags(self.tags.as_deref())
    }
}

/// Request body for the touch operation (POST /entries/:id/touch)
#[derive(Debug, Clone, Deserialize)]
pub struct TouchRequest {
    /// Seconds added to the entry's expiry
    pub extra_lifetime: u64,
}

/// Request body for the clean operation (POST /clean)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CleanRequest {
    /// Which entries to remove
    #[serde(default)]
    pub mode: CleanMode,
    /// Tags used by the tag modes
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validates a cache id
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_id(id: &str) -> Option<String> {
    if id.is_empty() {
        return Some("Id cannot be empty".to_string());
    }
    if id.len() > MAX_ID_LENGTH {
        return Some(format!(
            "Id exceeds maximum length of {} bytes",
            MAX_ID_LENGTH
        ));
    }
    None
}

/// Validates a tag list
pub fn validate_tags(tags: &[String]) -> Option<String> {
    tags.iter().find_map(|tag| {
        if tag.is_empty() {
            Some("Tags cannot be empty".to_string())
        } else if tag.len() > MAX_TAG_LENGTH {
            Some(format!(
                "Tag exceeds maximum length of {} bytes",
                MAX_TAG_LENGTH
            ))
        } else {
            None
        }
    })
}

fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
