//! Credential storage backends.

pub mod memory;

use async_trait::async_trait;
use crate::types::Identity;

/// Trait for credential providers.
///
/// Lookups are read-only and must be safe to issue concurrently.
/// Implementations return `Ok(None)` for tokens they do not recognise;
/// `Err` is reserved for the provider itself being unavailable.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Error type for provider operations.
    type Error: std::error::Error + Send + Sync;

    /// Resolve a raw bearer token to the identity it belongs to.
    async fn resolve_token(&self, token: &str) -> Result<Option<Identity>, Self::Error>;
}

pub use memory::{InMemoryCredentialStore, InMemoryError};
