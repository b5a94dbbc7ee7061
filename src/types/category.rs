//! Lexical categories served by the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four closed lexical categories.
///
/// Ordering follows declaration order so that maps keyed by category
/// iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Nouns.
    Noun,
    /// Verbs.
    Verb,
    /// Adjectives.
    Adjective,
    /// Adverbs.
    Adverb,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Noun,
        Category::Verb,
        Category::Adjective,
        Category::Adverb,
    ];

    /// Singular name (`"noun"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Adjective => "adjective",
            Self::Adverb => "adverb",
        }
    }

    /// Plural form used as the URL path segment (`"nouns"`).
    pub fn route_segment(&self) -> &'static str {
        match self {
            Self::Noun => "nouns",
            Self::Verb => "verbs",
            Self::Adjective => "adjectives",
            Self::Adverb => "adverbs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the singular or plural form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered || c.route_segment() == lowered)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
