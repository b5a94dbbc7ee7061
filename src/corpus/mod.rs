//! Word corpora keyed by category.
//!
//! Corpora are loaded once at start-up and never mutated afterwards, so
//! they can be shared across request tasks behind an `Arc` without locks.

mod builtin;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::Category;

/// Errors raised while building a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// A category ended up with no words.
    #[error("Corpus for category {0} is empty")]
    EmptyCategory(Category),

    /// A category was not supplied at all.
    #[error("Corpus for category {0} is missing")]
    MissingCategory(Category),

    /// A corpus file could not be read.
    #[error("Failed to read corpus file {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Read-only source of words for each category.
///
/// Implementations must return a non-empty slice for every category.
pub trait CorpusProvider: Send + Sync {
    /// Words for the category, in corpus order.
    fn words_for(&self, category: Category) -> &[String];
}

/// Immutable in-memory corpus covering all four categories.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: BTreeMap<Category, Vec<String>>,
}

impl Corpus {
    /// Build a corpus from per-category word lists.
    ///
    /// Every category must be present and non-empty.
    pub fn from_lists<I, W, S>(lists: I) -> Result<Self, CorpusError>
    where
        I: IntoIterator<Item = (Category, W)>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: BTreeMap<Category, Vec<String>> = BTreeMap::new();
        for (category, list) in lists {
            words
                .entry(category)
                .or_default()
                .extend(list.into_iter().map(Into::into));
        }

        for category in Category::ALL {
            match words.get(&category) {
                None => return Err(CorpusError::MissingCategory(category)),
                Some(list) if list.is_empty() => return Err(CorpusError::EmptyCategory(category)),
                Some(_) => {}
            }
        }

        Ok(Self { words })
    }

    /// The bundled word lists.
    pub fn builtin() -> Self {
        let lists = [
            (Category::Noun, builtin::NOUNS),
            (Category::Verb, builtin::VERBS),
            (Category::Adjective, builtin::ADJECTIVES),
            (Category::Adverb, builtin::ADVERBS),
        ];
        let words = lists
            .into_iter()
            .map(|(category, list)| (category, list.iter().map(|w| w.to_string()).collect()))
            .collect();
        Self { words }
    }

    /// Load `nouns.txt`, `verbs.txt`, `adjectives.txt` and `adverbs.txt`
    /// from a directory.
    ///
    /// One word per line. Blank lines and lines starting with `#` are
    /// skipped.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        let mut lists = Vec::with_capacity(Category::ALL.len());

        for category in Category::ALL {
            let path = dir.join(format!("{}.txt", category.route_segment()));
            let contents = fs::read_to_string(&path)
                .map_err(|source| CorpusError::Io { path: path.clone(), source })?;
            lists.push((category, parse_word_list(&contents)));
        }

        Self::from_lists(lists)
    }

    /// Number of words in a category.
    pub fn len(&self, category: Category) -> usize {
        self.words_for(category).len()
    }

    /// Word counts for every category.
    pub fn sizes(&self) -> BTreeMap<Category, usize> {
        self.words.iter().map(|(c, w)| (*c, w.len())).collect()
    }
}

impl CorpusProvider for Corpus {
    fn words_for(&self, category: Category) -> &[String] {
        // Construction guarantees every category is present.
        self.words.get(&category).map(Vec::as_slice).unwrap_or_default()
    }
}

fn parse_word_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
