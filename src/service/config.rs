//! Service configuration from environment variables.
//!
//! ## Variables
//!
//! - `HOST`: bind host (default: 0.0.0.0)
//! - `PORT`: bind port (default: 8002)
//! - `LOG_FORMAT`: "json" or "pretty" (default: json)
//! - `LEXICON_ACCESS_TOKENS`: comma separated `name:token` pairs
//! - `LEXICON_CORPUS_DIR`: directory with `<category>.txt` word lists
//! - `LEXICON_AUTH_TIMEOUT_MS`: credential lookup timeout (default: 5000)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::types::AccessToken;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8002;

/// Default credential lookup timeout.
pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Name given to tokens configured without one.
const DEFAULT_CLIENT_NAME: &str = "client";

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// What was expected.
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Structured JSON lines.
    #[default]
    Json,
    /// Human-readable output for local development.
    Pretty,
}

/// Runtime configuration for the service binary.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
    /// Tokens provisioned at start-up, with their account names.
    pub access_tokens: Vec<(String, AccessToken)>,
    /// Optional corpus directory; the bundled corpus is used otherwise.
    pub corpus_dir: Option<PathBuf>,
    /// Credential lookup timeout.
    pub auth_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            log_format: LogFormat::Json,
            access_tokens: Vec::new(),
            corpus_dir: None,
            auth_timeout: DEFAULT_AUTH_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("HOST") {
            config.host = host.trim().to_string();
        }

        if let Some(port) = get("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", &port, "expected a port number"))?;
        }

        if let Some(format) = get("LOG_FORMAT") {
            config.log_format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => return Err(ConfigError::invalid("LOG_FORMAT", &format, "expected json or pretty")),
            };
        }

        if let Some(tokens) = get("LEXICON_ACCESS_TOKENS") {
            config.access_tokens = parse_access_tokens(&tokens)?;
        }

        config.corpus_dir = get("LEXICON_CORPUS_DIR").map(PathBuf::from);

        if let Some(ms) = get("LEXICON_AUTH_TIMEOUT_MS") {
            let millis: u64 = ms
                .trim()
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| ConfigError::invalid("LEXICON_AUTH_TIMEOUT_MS", &ms, "expected milliseconds > 0"))?;
            config.auth_timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ConfigError::invalid("HOST", &self.host, "expected an IP address"))
    }
}

fn parse_access_tokens(raw: &str) -> Result<Vec<(String, AccessToken)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (name, token) = match entry.split_once(':') {
                Some((name, token)) => (name.trim(), token.trim()),
                None => (DEFAULT_CLIENT_NAME, entry),
            };
            if name.is_empty() || token.is_empty() {
                // Never echo the token itself.
                return Err(ConfigError::invalid(
                    "LEXICON_ACCESS_TOKENS",
                    name,
                    "expected name:token",
                ));
            }
            Ok((name.to_string(), AccessToken::new(token)))
        })
        .collect()
}
