//! Authentication middleware for the list API.

use axum::{
    extract::{Query, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{presented_fingerprint, AuthError};
use crate::store::CredentialProvider;

use super::middleware::{record_auth_outcome, RequestId};
use super::routes::ApiError;
use super::state::ServiceState;

/// Legacy token transport.
#[derive(Debug, Default, Deserialize)]
struct TokenQuery {
    access_token: Option<String>,
}

/// Admit the request only if it carries a token for an active identity.
///
/// On success the resolved [`Identity`](crate::types::Identity) is placed in
/// the request extensions. On failure the request is answered here and no
/// handler runs.
pub async fn require_access_token<P: CredentialProvider + 'static>(
    State(state): State<Arc<ServiceState<P>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();

    // A header that is not valid UTF-8 is kept as an empty value so it is
    // rejected as malformed instead of falling back to the query string.
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default().to_string());
    let query_token = Query::<TokenQuery>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(query)| query.access_token);

    let fingerprint = presented_fingerprint(auth_header.as_deref(), query_token.as_deref());

    let lookup = state
        .gate
        .authenticate(auth_header.as_deref(), query_token.as_deref());
    let outcome = match tokio::time::timeout(state.auth_timeout, lookup).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AuthError::ProviderUnavailable(format!(
            "lookup timed out after {}ms",
            state.auth_timeout.as_millis()
        ))),
    };

    match outcome {
        Ok(identity) => {
            record_auth_outcome(true, "ok", fingerprint.as_deref());
            debug!(identity_id = %identity.id, identity_name = %identity.name, "request admitted");
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            record_auth_outcome(false, err.reason(), fingerprint.as_deref());
            let mut error = ApiError::from(err);
            if let Some(RequestId(id)) = request_id {
                error = error.with_correlation_id(id);
            }
            error.into_response()
        }
    }
}
