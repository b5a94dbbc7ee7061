//! Lexicon REST Service
//!
//! Exposes the lexical sampler behind the bearer-token gate.
//!
//! ## Endpoints
//!
//! - `GET /api/v1/nouns` - Random nouns (`?count=n`, default 10)
//! - `GET /api/v1/verbs` - Random verbs
//! - `GET /api/v1/adjectives` - Random adjectives
//! - `GET /api/v1/adverbs` - Random adverbs
//! - `GET /` - Home page
//! - `GET /health` - Detailed service health check
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! All `/api/v1` routes require `Authorization: Bearer <token>` or the
//! legacy `access_token` query parameter.

pub mod auth;
pub mod config;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::require_access_token;
pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use middleware::{record_auth_outcome, record_sample_metrics, request_logging_middleware, RequestId};
pub use routes::{create_router, ApiError, AppState, ErrorResponse};
pub use state::{announce_development_token, ServiceState};
