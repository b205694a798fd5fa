//! Tag Selection
//!
//! Tag set operations used to select entries for listing and invalidation.

use serde::{Deserialize, Serialize};

use crate::storage::{Filter, TagMatch};

// == Tag Selector ==
/// How query tags select entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSelector {
    /// Entry carries all query tags (AND)
    Matching,
    /// Entry carries none of the query tags
    NotMatching,
    /// Entry carries at least one query tag (OR)
    MatchingAny,
}

impl TagSelector {
    /// Builds the storage filter for this selection.
    pub fn filter(self, tags: &[String]) -> Filter {
        let tags = tags.to_vec();
        Filter::Tags(match self {
            TagSelector::Matching => TagMatch::All(tags),
            TagSelector::NotMatching => TagMatch::NoneOf(tags),
            TagSelector::MatchingAny => TagMatch::Any(tags),
        })
    }
}

// == Clean Mode ==
/// Which entries `clean` removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanMode {
    /// Every entry; tags are ignored
    #[default]
    All,
    /// Entries whose expiry has passed; tags are ignored
    Old,
    /// Entries carrying all given tags
    MatchingTag,
    /// Entries carrying none of the given tags
    NotMatchingTag,
    /// Entries carrying at least one given tag
    MatchingAnyTag,
}

impl CleanMode {
    /// Tag selector for tag-driven modes, `None` for `All` and `Old`.
    pub fn tag_selector(self) -> Option<TagSelector> {
        match self {
            CleanMode::All | CleanMode::Old => None,
            CleanMode::MatchingTag => Some(TagSelector::Matching),
            CleanMode::NotMatchingTag => Some(TagSelector::NotMatching),
            CleanMode::MatchingAnyTag => Some(TagSelector::MatchingAny),
        }
    }
}
