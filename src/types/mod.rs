//! Core types for the lexicon service.

pub mod category;
pub mod identity;
pub mod sample;

pub use category::{Category, UnknownCategory};
pub use identity::{token_digest, token_fingerprint, AccessToken, Identity, IdentityId};
pub use sample::{SampleCount, SampleError, SampleRequest, SampleResult, DEFAULT_SAMPLE_COUNT};
