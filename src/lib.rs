//! # lexicon-service
//!
//! Randomized lexical-category word lists behind bearer-token
//! authentication.
//!
//! ## Architecture
//!
//! ```text
//! Request → AuthGate → route by Category → LexicalSampler → JSON array
//!              ↓                                 ↓
//!     CredentialProvider                 CorpusProvider (immutable)
//! ```
//!
//! ## Guarantees
//!
//! - A rejected request never reaches the sampler or the corpus
//! - A successful response holds exactly `count` words (default 10)
//! - Draws are independent and with replacement, so counts larger than
//!   the corpus are honored in full

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod corpus;
pub mod sampler;
pub mod store;
pub mod types;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use auth::{extract_token, AuthError, AuthGate};
pub use corpus::{Corpus, CorpusError, CorpusProvider};
pub use sampler::LexicalSampler;
pub use store::{CredentialProvider, InMemoryCredentialStore, InMemoryError};
pub use types::{
    AccessToken, Category, Identity, IdentityId, SampleCount, SampleError, SampleRequest,
    SampleResult, UnknownCategory, DEFAULT_SAMPLE_COUNT,
};

// Service re-exports (when service feature is enabled)
#[cfg(feature = "service")]
pub use service::{create_router, ServiceConfig, ServiceState};

/// Path prefix of the list API.
pub const API_VERSION_PREFIX: &str = "/api/v1";
