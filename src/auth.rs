//! Bearer-token authentication gate.
//!
//! Extracts a token from the request, resolves it against a
//! [`CredentialProvider`], and admits or rejects the caller. Nothing here
//! touches the corpus, so a rejected request never reaches sampling.

use std::sync::Arc;

use crate::store::CredentialProvider;
use crate::types::{token_fingerprint, AccessToken, Identity};

/// Upper bound on `Authorization` header length.
const MAX_AUTH_HEADER_BYTES: usize = 4096;

/// Authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No token in the header or query string.
    #[error("missing access token")]
    MissingToken,

    /// An `Authorization` header was sent but is not a bearer credential.
    #[error("invalid authorization header")]
    MalformedHeader,

    /// The token does not resolve to any identity.
    #[error("unknown access token")]
    UnknownToken,

    /// The token resolved to an identity that has been revoked.
    #[error("access token revoked")]
    Revoked,

    /// The credential provider failed or did not answer in time.
    #[error("credential provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl AuthError {
    /// Whether the failure is the caller's fault (as opposed to ours).
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, Self::ProviderUnavailable(_))
    }

    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::MalformedHeader => "malformed_header",
            Self::UnknownToken => "unknown_token",
            Self::Revoked => "revoked",
            Self::ProviderUnavailable(_) => "provider_unavailable",
        }
    }
}

/// Pick the caller's token.
///
/// The `Authorization: Bearer` header wins. The `access_token` query
/// parameter is accepted only when no `Authorization` header was sent.
pub fn extract_token(
    auth_header: Option<&str>,
    query_token: Option<&str>,
) -> Result<AccessToken, AuthError> {
    if let Some(header) = auth_header {
        return parse_bearer_header(header);
    }

    query_token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(AccessToken::new)
        .ok_or(AuthError::MissingToken)
}

fn parse_bearer_header(header: &str) -> Result<AccessToken, AuthError> {
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::MalformedHeader);
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(AccessToken::new(token))
}

/// Gate in front of the list endpoints.
pub struct AuthGate<P: CredentialProvider> {
    provider: Arc<P>,
}

impl<P: CredentialProvider> AuthGate<P> {
    /// Create a gate backed by a credential provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Resolve a token to an active identity.
    ///
    /// Revoked identities are rejected even if the provider returns them.
    pub async fn admit(&self, token: &AccessToken) -> Result<Identity, AuthError> {
        let identity = self
            .provider
            .resolve_token(token.expose())
            .await
            .map_err(|e| AuthError::ProviderUnavailable(e.to_string()))?
            .ok_or(AuthError::UnknownToken)?;

        if identity.is_revoked() {
            return Err(AuthError::Revoked);
        }
        Ok(identity)
    }

    /// Extract and resolve in one step.
    pub async fn authenticate(
        &self,
        auth_header: Option<&str>,
        query_token: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let token = extract_token(auth_header, query_token)?;
        self.admit(&token).await
    }

    /// The backing provider.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }
}

impl<P: CredentialProvider> Clone for AuthGate<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

/// Log-safe fingerprint of whatever token the caller presented, if any.
pub fn presented_fingerprint(auth_header: Option<&str>, query_token: Option<&str>) -> Option<String> {
    extract_token(auth_header, query_token)
        .ok()
        .map(|token| token_fingerprint(token.expose()))
}
