//! Query Filters
//!
//! The predicate language passed to a `DocumentStore`. Cache logic builds
//! filters; stores evaluate them (or translate them to their native query).

use std::collections::HashSet;

use crate::cache::CacheEntry;

// == Filter ==
/// A predicate over stored cache entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every entry
    All,
    /// The entry with this identifier
    Id(String),
    /// Comparison on `expire_time`
    ExpireTime(Bound),
    /// Set predicate on `tags`
    Tags(TagMatch),
    /// Every sub-filter must match
    And(Vec<Filter>),
    /// At least one sub-filter must match
    Or(Vec<Filter>),
}

impl Filter {
    /// Evaluates the filter against an entry.
    pub fn matches(&self, entry: &CacheEntry) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => entry.id == *id,
            Filter::ExpireTime(bound) => bound.accepts(entry.expire_time),
            Filter::Tags(tags) => tags.accepts(&entry.tags),
            Filter::And(filters) => filters.iter().all(|f| f.matches(entry)),
            Filter::Or(filters) => filters.iter().any(|f| f.matches(entry)),
        }
    }

    /// Returns the id this filter is pinned to, if any.
    pub fn target_id(&self) -> Option<&str> {
        match self {
            Filter::Id(id) => Some(id.as_str()),
            Filter::And(filters) => filters.iter().find_map(Filter::target_id),
            _ => None,
        }
    }
}

// == Bound ==
/// Integer comparison against a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Eq(i64),
    Gt(i64),
    Gte(i64),
    Lt(i64),
}

impl Bound {
    pub fn accepts(&self, value: i64) -> bool {
        match *self {
            Bound::Eq(v) => value == v,
            Bound::Gt(v) => value > v,
            Bound::Gte(v) => value >= v,
            Bound::Lt(v) => value < v,
        }
    }
}

// == Tag Match ==
/// Set predicate between an entry's tags and a list of query tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagMatch {
    /// Entry carries every query tag (superset)
    All(Vec<String>),
    /// Entry carries at least one query tag
    Any(Vec<String>),
    /// Entry carries none of the query tags
    NoneOf(Vec<String>),
}

impl TagMatch {
    pub fn accepts(&self, entry_tags: &[String]) -> bool {
        match self {
            TagMatch::All(query) => {
                let present: HashSet<&str> = entry_tags.iter().map(String::as_str).collect();
                query.iter().all(|tag| present.contains(tag.as_str()))
            }
            TagMatch::Any(query) => query.iter().any(|tag| entry_tags.contains(tag)),
            TagMatch::NoneOf(query) => !query.iter().any(|tag| entry_tags.contains(tag)),
        }
    }
}
