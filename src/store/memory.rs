//! In-memory credential store.
//!
//! Stands in for the external account store: the binary provisions it
//! from configuration and tests provision it directly.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use super::CredentialProvider;
use crate::types::{token_digest, AccessToken, Identity};

/// Error type for in-memory store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InMemoryError {
    /// The token is already registered.
    #[error("Token already registered: {0}")]
    DuplicateToken(String),
    /// The token is not registered.
    #[error("Token not found: {0}")]
    TokenNotFound(String),
}

/// In-memory credential store.
///
/// Keys are SHA-256 digests of tokens, so raw tokens are not retained.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<BTreeMap<String, Identity>>,
}

impl InMemoryCredentialStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a new identity with a freshly generated token.
    pub fn issue(&self, name: impl Into<String>) -> (Identity, AccessToken) {
        let identity = Identity::new(name);
        let token = AccessToken::generate();
        self.identities
            .write()
            .insert(token.digest(), identity.clone());
        (identity, token)
    }

    /// Register a known token for a new identity.
    pub fn insert(&self, name: impl Into<String>, token: &AccessToken) -> Result<Identity, InMemoryError> {
        let digest = token.digest();
        let mut identities = self.identities.write();
        if identities.contains_key(&digest) {
            return Err(InMemoryError::DuplicateToken(token.fingerprint()));
        }
        let identity = Identity::new(name);
        identities.insert(digest, identity.clone());
        Ok(identity)
    }

    /// Mark the identity behind a token as revoked.
    ///
    /// Revoked identities stay in the store but no longer resolve.
    pub fn revoke(&self, token: &AccessToken) -> Result<Identity, InMemoryError> {
        let mut identities = self.identities.write();
        let identity = identities
            .get_mut(&token.digest())
            .ok_or_else(|| InMemoryError::TokenNotFound(token.fingerprint()))?;
        identity.revoked_at.get_or_insert_with(Utc::now);
        Ok(identity.clone())
    }

    /// Remove a token and its identity.
    pub fn remove(&self, token: &AccessToken) -> Result<Identity, InMemoryError> {
        self.identities
            .write()
            .remove(&token.digest())
            .ok_or_else(|| InMemoryError::TokenNotFound(token.fingerprint()))
    }

    /// Number of registered tokens, revoked ones included.
    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }

    /// Number of tokens that still resolve.
    pub fn active_count(&self) -> usize {
        self.identities
            .read()
            .values()
            .filter(|identity| !identity.is_revoked())
            .count()
    }
}

#[async_trait]
impl CredentialProvider for InMemoryCredentialStore {
    type Error = InMemoryError;

    async fn resolve_token(&self, token: &str) -> Result<Option<Identity>, Self::Error> {
        let identities = self.identities.read();
        Ok(identities
            .get(&token_digest(token))
            .filter(|identity| !identity.is_revoked())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_issue_then_resolve() {
        let store = InMemoryCredentialStore::new();
        let (identity, token) = store.issue("reader");

        let resolved = store.resolve_token(token.expose()).await.unwrap();
        assert_eq!(resolved, Some(identity));
    }

    #[tokio::test]
    async fn test_resolution_is_repeatable() {
        let store = InMemoryCredentialStore::new();
        let (_, token) = store.issue("reader");

        for _ in 0..3 {
            assert!(store.resolve_token(token.expose()).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let store = InMemoryCredentialStore::new();
        store.issue("reader");
        assert!(store.resolve_token("never-issued").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revoked_token_does_not_resolve() {
        let store = InMemoryCredentialStore::new();
        let (_, token) = store.issue("reader");

        let revoked = store.revoke(&token).unwrap();
        assert!(revoked.is_revoked());
        assert!(store.resolve_token(token.expose()).await.unwrap().is_none());
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_count(), 0);
    }

    #[tokio::test]
    async fn test_removed_token_does_not_resolve() {
        let store = InMemoryCredentialStore::new();
        let (_, token) = store.issue("reader");

        store.remove(&token).unwrap();
        assert!(store.resolve_token(token.expose()).await.unwrap().is_none());
        assert!(store.is_empty());
        assert!(matches!(store.remove(&token), Err(InMemoryError::TokenNotFound(_))));
    }

    #[test]
    fn test_insert_rejects_duplicates() {
        let store = InMemoryCredentialStore::new();
        let token = AccessToken::new("fixed-token");

        store.insert("first", &token).unwrap();
        let err = store.insert("second", &token).unwrap_err();
        assert!(matches!(err, InMemoryError::DuplicateToken(_)));
    }
}
