//! Axum routes for the lexicon service.

use axum::{
    extract::{rejection::QueryRejection, Extension, Json, Query, State},
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, MethodRouter},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::auth::AuthError;
use crate::store::{CredentialProvider, InMemoryCredentialStore};
use crate::types::{Category, Identity, SampleCount, SampleError, SampleRequest, SampleResult};
use crate::API_VERSION_PREFIX;

use super::auth::require_access_token;
use super::middleware::{record_sample_metrics, request_logging_middleware, RequestId};
use super::state::ServiceState;

/// Type alias for the service state with the in-memory credential store.
pub type AppState = ServiceState<InMemoryCredentialStore>;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters accepted by the list endpoints.
///
/// `count` stays a string so malformed values surface as `INVALID_COUNT`
/// rather than a generic extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Requested number of words.
    pub count: Option<String>,
}

/// Service health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Words loaded per category.
    pub corpus: BTreeMap<Category, usize>,
}

/// Simple liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Readiness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub details: Option<String>,
}

/// Structured error response with correlation ID for tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Correlation ID for request tracing (matches X-Cloud-Trace-Context or generated UUID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            correlation_id: None,
            details: None,
        }
    }

    /// Add a correlation ID to the error.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error returned by gated handlers and the auth middleware.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    /// Create an error with an explicit status.
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// Attach the request's correlation id.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.body = self.body.with_correlation_id(id);
        self
    }

    /// HTTP status of the error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// JSON body of the error.
    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::ProviderUnavailable(ref detail) => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new("PROVIDER_UNAVAILABLE", "credential provider unavailable")
                    .with_details(detail.clone()),
            ),
            // The reason stays in logs; callers only learn they were rejected.
            _ => Self::new(
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("UNAUTHENTICATED", "a valid access token is required"),
            ),
        }
    }
}

impl From<SampleError> for ApiError {
    fn from(err: SampleError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("INVALID_COUNT", err.to_string())
                .with_details("count must be a positive integer"),
        )
    }
}

impl From<QueryRejection> for ApiError {
    /// A query string that cannot be read (duplicate `count`, bad encoding)
    /// is reported like any other unusable count.
    fn from(rejection: QueryRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("INVALID_COUNT", "query string could not be read")
                .with_details(rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::warn!(
            status = self.status.as_u16(),
            code = %self.body.code,
            error = %self.body.error,
            correlation_id = ?self.body.correlation_id,
            "Request error"
        );
        let mut response = (self.status, Json(self.body)).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer realm=\"lexicon\""));
        }
        response
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Draw words for one category.
///
/// Count validation happens before any corpus access.
fn list_words<P: CredentialProvider + 'static>(
    category: Category,
    state: &ServiceState<P>,
    query: Result<ListQuery, QueryRejection>,
    identity: Option<&Identity>,
    request_id: Option<RequestId>,
) -> Result<Json<SampleResult>, ApiError> {
    let with_id = |error: ApiError| match &request_id {
        Some(RequestId(id)) => error.with_correlation_id(id.clone()),
        None => error,
    };

    let query = query.map_err(|rejection| with_id(rejection.into()))?;
    let count = SampleCount::parse_param(query.count.as_deref())
        .map_err(|err| with_id(err.into()))?;

    let start = Instant::now();
    let result = state.sampler.sample(&SampleRequest::new(category, count));
    record_sample_metrics(category.as_str(), result.len(), start.elapsed().as_micros() as u64);

    if let Some(identity) = identity {
        debug!(identity_id = %identity.id, category = %category, count = result.len(), "words sampled");
    }

    Ok(Json(result))
}

/// Route serving one category.
fn category_route<P: CredentialProvider + 'static>(
    category: Category,
) -> MethodRouter<Arc<ServiceState<P>>> {
    get(
        move |State(state): State<Arc<ServiceState<P>>>,
              query: Result<Query<ListQuery>, QueryRejection>,
              identity: Option<Extension<Identity>>,
              request_id: Option<Extension<RequestId>>| async move {
            list_words(
                category,
                &state,
                query.map(|Query(query)| query),
                identity.as_ref().map(|Extension(identity)| identity),
                request_id.map(|Extension(id)| id),
            )
        },
    )
}

/// Home page.
async fn home_handler() -> &'static str {
    concat!(
        "Lexicon API\n",
        "\n",
        "GET /api/v1/nouns       random nouns\n",
        "GET /api/v1/verbs       random verbs\n",
        "GET /api/v1/adjectives  random adjectives\n",
        "GET /api/v1/adverbs     random adverbs\n",
        "\n",
        "Authenticate with `Authorization: Bearer <token>` or `?access_token=<token>`.\n",
        "Use `?count=<n>` for n words (default 10).\n",
    )
}

/// Health check endpoint (detailed).
async fn health_handler<P: CredentialProvider + 'static>(
    State(state): State<Arc<ServiceState<P>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        corpus: state.corpus().sizes(),
    })
}

/// Liveness probe endpoint.
///
/// Returns 200 if the process is alive. Does NOT check dependencies.
async fn liveness_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

/// Readiness probe endpoint.
///
/// Returns 200 once every category has words, 503 otherwise.
async fn readiness_handler<P: CredentialProvider + 'static>(
    State(state): State<Arc<ServiceState<P>>>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let empty: Vec<_> = Category::ALL
        .into_iter()
        .filter(|c| state.sampler.corpus_len(*c) == 0)
        .map(|c| c.to_string())
        .collect();

    if empty.is_empty() {
        Ok(Json(ReadinessResponse {
            ready: true,
            details: None,
        }))
    } else {
        Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                ready: false,
                details: Some(format!("empty corpus: {}", empty.join(", "))),
            }),
        ))
    }
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the lexicon service.
///
/// Every route under the API prefix sits behind the access-token gate.
pub fn create_router<P: CredentialProvider + 'static>(state: ServiceState<P>) -> Router {
    let state = Arc::new(state);

    let api = Category::ALL
        .into_iter()
        .fold(Router::new(), |router, category| {
            router.route(&format!("/{}", category.route_segment()), category_route::<P>(category))
        })
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            require_access_token::<P>,
        ));

    Router::new()
        .route("/", get(home_handler))
        // Health checks
        .route("/health", get(health_handler::<P>))
        .route("/health/live", get(liveness_handler))
        .route("/health/ready", get(readiness_handler::<P>))
        // Word lists
        .nest(API_VERSION_PREFIX, api)
        .layer(middleware::from_fn(request_logging_middleware))
        .with_state(state)
}
