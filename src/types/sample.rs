//! Sample request and result types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

use super::Category;

/// Number of words returned when the caller gives no count.
pub const DEFAULT_SAMPLE_COUNT: usize = 10;

/// Errors raised while validating a sample request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    /// The count parameter is not a positive integer.
    #[error("Invalid count {raw:?}: {reason}")]
    InvalidCount {
        /// The value as received.
        raw: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Requested number of words. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SampleCount(NonZeroUsize);

impl SampleCount {
    /// Create a count, returning `None` for zero.
    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    /// Parse an optional query value.
    ///
    /// Absent or blank values yield the default. Anything else must be a
    /// positive decimal integer; zero, negatives and junk are rejected
    /// rather than coerced.
    pub fn parse_param(raw: Option<&str>) -> Result<Self, SampleError> {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::default());
        };

        let invalid = |reason| SampleError::InvalidCount {
            raw: raw.to_string(),
            reason,
        };

        if raw.starts_with('-') {
            return Err(invalid("must not be negative"));
        }
        if !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("must be a whole number"));
        }
        let n: usize = raw.parse().map_err(|_| invalid("is too large"))?;
        Self::new(n).ok_or_else(|| invalid("must be at least 1"))
    }

    /// The count as a plain integer.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for SampleCount {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_SAMPLE_COUNT).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for SampleCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated request for words from one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRequest {
    /// Category to draw from.
    pub category: Category,
    /// How many words to draw.
    pub count: SampleCount,
}

impl SampleRequest {
    /// Create a request.
    pub fn new(category: Category, count: SampleCount) -> Self {
        Self { category, count }
    }

    /// Request the default number of words.
    pub fn with_default_count(category: Category) -> Self {
        Self::new(category, SampleCount::default())
    }
}

/// Words drawn for one request, in draw order.
///
/// Serializes as a bare JSON array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleResult(Vec<String>);

impl SampleResult {
    /// Wrap drawn words.
    pub fn new(words: Vec<String>) -> Self {
        Self(words)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no words were drawn.
    ///
    /// Never true unless a corpus provider returned an empty category.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the words.
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Take the words.
    pub fn into_words(self) -> Vec<String> {
        self.0
    }
}
