//! End-to-end tests for the list API.
//!
//! Drive the router in-process and check the HTTP contract: status codes,
//! array lengths, and that rejected requests never carry words.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use lexicon_service::service::{create_router, ErrorResponse, ServiceState};
use lexicon_service::{
    AccessToken, Category, Corpus, CorpusProvider, CredentialProvider, Identity,
    InMemoryCredentialStore,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────────────────────────

struct Fixture {
    router: Router,
    store: Arc<InMemoryCredentialStore>,
    token: AccessToken,
    corpus: Arc<Corpus>,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryCredentialStore::new());
    let (_, token) = store.issue("Foo Bar");
    let corpus = Arc::new(Corpus::builtin());
    let state = ServiceState::from_shared(Arc::clone(&store), Arc::clone(&corpus));
    Fixture {
        router: create_router(state),
        store,
        token,
        corpus,
    }
}

fn api_url(category: Category, token: Option<&AccessToken>, count: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(token) = token {
        params.push(format!("access_token={}", token.expose()));
    }
    if let Some(count) = count {
        params.push(format!("count={count}"));
    }
    let mut url = format!("/api/v1/{}", category.route_segment());
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.join("&"));
    }
    url
}

async fn get(router: &Router, uri: &str) -> Response {
    router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_header(router: &Router, uri: &str, authorization: &str) -> Response {
    router
        .clone()
        .oneshot(
            Request::get(uri)
                .header(header::AUTHORIZATION, authorization)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

async fn words(response: Response) -> Vec<String> {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

async fn assert_rejected(response: Response, expected: StatusCode) -> ErrorResponse {
    assert_eq!(response.status(), expected);
    let bytes = body_bytes(response).await;
    assert!(
        serde_json::from_slice::<Vec<String>>(&bytes).is_err(),
        "rejected response carried a word array"
    );
    serde_json::from_slice(&bytes).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// List endpoints
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_default_count_for_every_category() {
    let fx = fixture();
    for category in Category::ALL {
        let result = words(get(&fx.router, &api_url(category, Some(&fx.token), None)).await).await;
        assert_eq!(result.len(), 10, "{category}");

        let corpus = fx.corpus.words_for(category);
        assert!(result.iter().all(|w| corpus.contains(w)), "{category} drew a foreign word");
    }
}

#[tokio::test]
async fn test_specified_count_for_every_category() {
    let fx = fixture();
    for category in Category::ALL {
        let result =
            words(get(&fx.router, &api_url(category, Some(&fx.token), Some("22"))).await).await;
        assert_eq!(result.len(), 22, "{category}");
    }
}

#[tokio::test]
async fn test_count_larger_than_corpus() {
    let fx = fixture();
    let n = fx.corpus.len(Category::Adverb) * 3;
    let uri = api_url(Category::Adverb, Some(&fx.token), Some(&n.to_string()));
    assert_eq!(words(get(&fx.router, &uri).await).await.len(), n);
}

#[tokio::test]
async fn test_count_of_one() {
    let fx = fixture();
    let uri = api_url(Category::Verb, Some(&fx.token), Some("1"));
    assert_eq!(words(get(&fx.router, &uri).await).await.len(), 1);
}

#[tokio::test]
async fn test_empty_count_uses_default() {
    let fx = fixture();
    let uri = api_url(Category::Noun, Some(&fx.token), Some(""));
    assert_eq!(words(get(&fx.router, &uri).await).await.len(), 10);
}

#[tokio::test]
async fn test_invalid_counts_are_rejected() {
    let fx = fixture();
    for raw in ["0", "-5", "ten", "2.5"] {
        let uri = api_url(Category::Noun, Some(&fx.token), Some(raw));
        let error = assert_rejected(get(&fx.router, &uri).await, StatusCode::BAD_REQUEST).await;
        assert_eq!(error.code, "INVALID_COUNT", "count {raw:?}");
        assert!(error.correlation_id.is_some());
    }
}

#[tokio::test]
async fn test_duplicate_count_is_a_json_invalid_count() {
    let fx = fixture();
    let uri = format!("/api/v1/nouns?access_token={}&count=1&count=2", fx.token.expose());
    let response = get(&fx.router, &uri).await;

    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "got {content_type}");

    let error = assert_rejected(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(error.code, "INVALID_COUNT");
    assert!(error.correlation_id.is_some());
}

// ─────────────────────────────────────────────────────────────────────────────
// Authentication
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_missing_token_is_rejected_for_every_category() {
    let fx = fixture();
    for category in Category::ALL {
        let response = get(&fx.router, &api_url(category, None, None)).await;
        assert!(response.headers().contains_key(header::WWW_AUTHENTICATE));
        let error = assert_rejected(response, StatusCode::UNAUTHORIZED).await;
        assert_eq!(error.code, "UNAUTHENTICATED");
    }
}

#[tokio::test]
async fn test_never_issued_token_matches_missing_token() {
    let fx = fixture();
    let bogus = AccessToken::new("not-a-real-token");

    let missing = get(&fx.router, &api_url(Category::Adjective, None, None)).await;
    let invalid = get(&fx.router, &api_url(Category::Adjective, Some(&bogus), None)).await;

    let missing = assert_rejected(missing, StatusCode::UNAUTHORIZED).await;
    let invalid = assert_rejected(invalid, StatusCode::UNAUTHORIZED).await;
    assert_eq!(missing.code, invalid.code);
    assert_eq!(missing.error, invalid.error);
}

#[tokio::test]
async fn test_invalid_count_without_token_is_an_auth_failure() {
    let fx = fixture();
    let uri = api_url(Category::Noun, None, Some("-1"));
    assert_rejected(get(&fx.router, &uri).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_bearer_header() {
    let fx = fixture();
    let uri = api_url(Category::Noun, None, Some("5"));
    let response =
        get_with_header(&fx.router, &uri, &format!("Bearer {}", fx.token.expose())).await;
    assert_eq!(words(response).await.len(), 5);
}

#[tokio::test]
async fn test_malformed_header_does_not_fall_back_to_query() {
    let fx = fixture();
    let uri = api_url(Category::Noun, Some(&fx.token), None);
    let response = get_with_header(&fx.router, &uri, "Basic Zm9vOmJhcg==").await;
    assert_rejected(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_same_token_admitted_repeatedly() {
    let fx = fixture();
    let uri = api_url(Category::Verb, Some(&fx.token), None);
    for _ in 0..3 {
        assert_eq!(words(get(&fx.router, &uri).await).await.len(), 10);
    }
}

#[tokio::test]
async fn test_revoked_token_is_rejected() {
    let fx = fixture();
    let uri = api_url(Category::Noun, Some(&fx.token), None);
    assert_eq!(get(&fx.router, &uri).await.status(), StatusCode::OK);

    fx.store.revoke(&fx.token).unwrap();
    assert_rejected(get(&fx.router, &uri).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn test_removed_token_is_rejected() {
    let fx = fixture();
    fx.store.remove(&fx.token).unwrap();
    let uri = api_url(Category::Noun, Some(&fx.token), None);
    assert_rejected(get(&fx.router, &uri).await, StatusCode::UNAUTHORIZED).await;
}

struct HangingProvider;

#[async_trait]
impl CredentialProvider for HangingProvider {
    type Error = std::io::Error;

    async fn resolve_token(&self, _token: &str) -> Result<Option<Identity>, Self::Error> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_hung_provider_times_out_with_503() {
    let state = ServiceState::new(HangingProvider, Corpus::builtin())
        .with_auth_timeout(Duration::from_millis(20));
    let router = create_router(state);

    let uri = "/api/v1/nouns?access_token=anything";
    let error = assert_rejected(get(&router, uri).await, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(error.code, "PROVIDER_UNAVAILABLE");

    // Unrelated routes keep serving.
    assert_eq!(get(&router, "/health/live").await.status(), StatusCode::OK);
}

// ─────────────────────────────────────────────────────────────────────────────
// Concurrency
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_do_not_interfere() {
    let fx = fixture();
    let counts = [1usize, 7, 22, 150];

    let handles: Vec<_> = counts
        .iter()
        .map(|&n| {
            let router = fx.router.clone();
            let uri = api_url(Category::Noun, Some(&fx.token), Some(&n.to_string()));
            tokio::spawn(async move { (n, words(get(&router, &uri).await).await.len()) })
        })
        .collect();

    for handle in handles {
        let (requested, returned) = handle.await.unwrap();
        assert_eq!(requested, returned);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public routes
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_home_page() {
    let fx = fixture();
    let response = get(&fx.router, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(body.to_lowercase().contains("api"));
}

#[tokio::test]
async fn test_health_reports_corpus_sizes() {
    let fx = fixture();
    let response = get(&fx.router, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["corpus"]["noun"], fx.corpus.len(Category::Noun));
}

#[tokio::test]
async fn test_readiness() {
    let fx = fixture();
    assert_eq!(get(&fx.router, "/health/ready").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_header_echoed() {
    let fx = fixture();
    let response = fx
        .router
        .clone()
        .oneshot(
            Request::get("/health/live")
                .header("X-Cloud-Trace-Context", "abc123/1;o=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc123");
}
