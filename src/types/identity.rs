//! Caller identities and the bearer tokens that resolve to them.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Number of random bytes in a generated access token.
const TOKEN_BYTES: usize = 32;

/// Hex characters of the digest kept in log fingerprints.
const FINGERPRINT_LEN: usize = 12;

/// Unique identifier for a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IdentityId(Uuid);

impl IdentityId {
    /// Create an identifier from a UUID.
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A caller known to the credential provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable identifier.
    pub id: IdentityId,
    /// Human-readable name of the account.
    pub name: String,
    /// When the identity was provisioned.
    pub created_at: DateTime<Utc>,
    /// Set once the identity has been revoked.
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Create an active identity with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: IdentityId::random(),
            name: name.into(),
            created_at: Utc::now(),
            revoked_at: None,
        }
    }

    /// Whether the identity has been revoked.
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// Opaque bearer token.
///
/// `Debug` and `Display` print only the fingerprint so tokens never end
/// up in logs verbatim.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an existing token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generate a random 256-bit token, hex encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// The raw token. Only hand this to the caller that owns it.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// SHA-256 digest of the token, hex encoded.
    pub fn digest(&self) -> String {
        token_digest(&self.0)
    }

    /// Short digest prefix safe to log.
    pub fn fingerprint(&self) -> String {
        token_fingerprint(&self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken({})", self.fingerprint())
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// SHA-256 digest of a raw token string, hex encoded.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

/// Log-safe fingerprint of a raw token string.
pub fn token_fingerprint(token: &str) -> String {
    let mut digest = token_digest(token);
    digest.truncate(FINGERPRINT_LEN);
    digest
}
