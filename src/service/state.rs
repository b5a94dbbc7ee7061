//! Service state management.
//!
//! Holds the auth gate, the sampler and its corpus. Everything here is
//! either immutable or behind the provider's own synchronization, so the
//! state is cloned per request by `Arc` bumps only.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::auth::AuthGate;
use crate::corpus::Corpus;
use crate::sampler::LexicalSampler;
use crate::store::{CredentialProvider, InMemoryCredentialStore};
use crate::types::AccessToken;

use super::config::{ServiceConfig, DEFAULT_AUTH_TIMEOUT};

/// Shared service state.
pub struct ServiceState<P: CredentialProvider + 'static> {
    /// Gate resolving bearer tokens.
    pub gate: AuthGate<P>,
    /// Sampler over the loaded corpus.
    pub sampler: LexicalSampler<Corpus>,
    /// Credential lookup timeout.
    pub auth_timeout: Duration,
}

impl<P: CredentialProvider + 'static> ServiceState<P> {
    /// Create service state from a credential provider and corpus.
    pub fn new(provider: P, corpus: Corpus) -> Self {
        Self::from_shared(Arc::new(provider), Arc::new(corpus))
    }

    /// Create service state from already shared parts.
    pub fn from_shared(provider: Arc<P>, corpus: Arc<Corpus>) -> Self {
        Self {
            gate: AuthGate::new(provider),
            sampler: LexicalSampler::new(corpus),
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
        }
    }

    /// Override the credential lookup timeout.
    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// The loaded corpus.
    pub fn corpus(&self) -> &Corpus {
        self.sampler.corpus()
    }
}

impl<P: CredentialProvider + 'static> Clone for ServiceState<P> {
    fn clone(&self) -> Self {
        Self {
            gate: self.gate.clone(),
            sampler: self.sampler.clone(),
            auth_timeout: self.auth_timeout,
        }
    }
}

impl ServiceState<InMemoryCredentialStore> {
    /// Build state for the binary from configuration.
    ///
    /// Provisions the configured tokens. When none are configured a single
    /// development token is generated and returned so the caller can
    /// announce it.
    pub fn from_config(
        config: &ServiceConfig,
        corpus: Corpus,
    ) -> Result<(Self, Option<AccessToken>), crate::store::InMemoryError> {
        let store = InMemoryCredentialStore::new();
        let mut generated = None;

        if config.access_tokens.is_empty() {
            let (_, token) = store.issue("development");
            generated = Some(token);
        } else {
            for (name, token) in &config.access_tokens {
                store.insert(name.clone(), token)?;
            }
        }

        let state = Self::new(store, corpus).with_auth_timeout(config.auth_timeout);
        Ok((state, generated))
    }

    /// The in-memory store behind the gate.
    pub fn credentials(&self) -> &InMemoryCredentialStore {
        self.gate.provider()
    }
}

/// Hand a generated development token to the operator.
///
/// The token is written once to `out` (stderr in the binary) and stays out
/// of the tracing pipeline; the log event carries only its fingerprint.
pub fn announce_development_token(token: &AccessToken, out: &mut impl Write) -> io::Result<()> {
    tracing::warn!(
        token_fingerprint = %token.fingerprint(),
        "LEXICON_ACCESS_TOKENS not set, generated a development token. \
         Set this for production!"
    );
    writeln!(out, "development access token: {}", token.expose())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_from_config_generates_development_token() {
        let config = ServiceConfig::default();
        let (state, token) = ServiceState::from_config(&config, Corpus::builtin()).unwrap();

        assert!(token.is_some());
        assert_eq!(state.credentials().len(), 1);
    }

    #[test]
    fn test_from_config_provisions_configured_tokens() {
        let config = ServiceConfig {
            access_tokens: vec![
                ("alice".to_string(), AccessToken::new("tok-a")),
                ("bob".to_string(), AccessToken::new("tok-b")),
            ],
            auth_timeout: Duration::from_millis(100),
            ..ServiceConfig::default()
        };
        let (state, token) = ServiceState::from_config(&config, Corpus::builtin()).unwrap();

        assert!(token.is_none());
        assert_eq!(state.credentials().active_count(), 2);
        assert_eq!(state.auth_timeout, Duration::from_millis(100));
    }

    #[test]
    fn test_from_config_rejects_duplicate_tokens() {
        let config = ServiceConfig {
            access_tokens: vec![
                ("alice".to_string(), AccessToken::new("same")),
                ("bob".to_string(), AccessToken::new("same")),
            ],
            ..ServiceConfig::default()
        };
        assert!(ServiceState::from_config(&config, Corpus::builtin()).is_err());
    }

    #[test]
    fn test_development_token_written_to_operator_stream() {
        let token = AccessToken::generate();
        let mut out = Vec::new();

        announce_development_token(&token, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains(token.expose()));
    }

    #[test]
    fn test_clone_shares_corpus() {
        let state = ServiceState::new(InMemoryCredentialStore::new(), Corpus::builtin());
        let cloned = state.clone();
        assert!(std::ptr::eq(state.corpus(), cloned.corpus()));
        assert_eq!(cloned.corpus().len(Category::Noun), state.corpus().len(Category::Noun));
    }
}
