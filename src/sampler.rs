//! Randomized word sampler.
//!
//! Turns a fixed corpus into a response of the requested size by drawing
//! independently, with replacement.

use std::sync::Arc;

use rand::Rng;

use crate::corpus::CorpusProvider;
use crate::types::{Category, SampleRequest, SampleResult};

/// Draws words from a shared corpus.
///
/// ## Algorithm
///
/// 1. Look up the category's corpus (non-empty by construction)
/// 2. Perform `count` draws, each a uniform index in `[0, len)`
/// 3. Return the words in draw order
///
/// Draws are independent, so duplicates are expected and counts larger
/// than the corpus are honored in full.
pub struct LexicalSampler<C: CorpusProvider> {
    corpus: Arc<C>,
}

impl<C: CorpusProvider> LexicalSampler<C> {
    /// Create a sampler over a shared corpus.
    pub fn new(corpus: Arc<C>) -> Self {
        Self { corpus }
    }

    /// Sample using the calling thread's generator.
    ///
    /// The thread-local generator is never held across an await point, so
    /// concurrent requests never share generator state.
    pub fn sample(&self, request: &SampleRequest) -> SampleResult {
        self.sample_with(request, &mut rand::rng())
    }

    /// Sample with an explicit generator.
    ///
    /// The result holds exactly `request.count` words. An empty result only
    /// happens when the provider breaks its non-empty contract, which debug
    /// builds treat as a bug.
    pub fn sample_with<R: Rng + ?Sized>(&self, request: &SampleRequest, rng: &mut R) -> SampleResult {
        let words = self.corpus.words_for(request.category);
        let count = request.count.get();

        debug_assert!(!words.is_empty(), "empty corpus for category {}", request.category);
        if words.is_empty() {
            tracing::error!(category = %request.category, "empty corpus reached sampler");
            return SampleResult::new(Vec::new());
        }

        let drawn = (0..count)
            .map(|_| words[rng.random_range(0..words.len())].clone())
            .collect();

        SampleResult::new(drawn)
    }

    /// Words available for a category.
    pub fn corpus_len(&self, category: Category) -> usize {
        self.corpus.words_for(category).len()
    }

    /// The underlying corpus.
    pub fn corpus(&self) -> &Arc<C> {
        &self.corpus
    }
}

impl<C: CorpusProvider> Clone for LexicalSampler<C> {
    fn clone(&self) -> Self {
        Self {
            corpus: Arc::clone(&self.corpus),
        }
    }
}
