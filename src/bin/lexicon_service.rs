//! Lexicon Service Binary
//!
//! Runs the lexicon REST API with:
//! - Structured JSON logging
//! - Request tracing with correlation IDs
//! - Graceful shutdown handling
//! - Health check endpoints
//!
//! ## Configuration
//!
//! See [`lexicon_service::service::config`] for the full list. The common ones:
//! - `PORT`: Service port (default: 8002)
//! - `HOST`: Service host (default: 0.0.0.0)
//! - `LEXICON_ACCESS_TOKENS`: `name:token` pairs accepted by the API
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//!
//! ## Usage
//!
//! ```bash
//! LEXICON_ACCESS_TOKENS=reader:s3cret cargo run --bin lexicon_service
//! ```

use axum::body::Body;
use axum::http::Request;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use lexicon_service::service::{
    announce_development_token, create_router, LogFormat, ServiceConfig, ServiceState,
};
use lexicon_service::{Category, Corpus};

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lexicon_service=info,lexicon=info,tower_http=info".into());

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_span_events(FmtSpan::CLOSE),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_current_span(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .flatten_event(true),
                )
                .init();
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown"),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);

    let version = env!("CARGO_PKG_VERSION");
    let build_sha = option_env!("BUILD_SHA").unwrap_or("dev");

    info!(
        version = version,
        build_sha = build_sha,
        "Starting Lexicon Service"
    );

    let corpus = match &config.corpus_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Loading corpus from directory");
            Corpus::load_dir(dir).map_err(|e| {
                tracing::error!(error = %e, "Failed to load corpus");
                e
            })?
        }
        None => Corpus::builtin(),
    };

    for category in Category::ALL {
        info!(category = %category, words = corpus.len(category), "Corpus loaded");
    }

    let (state, generated) = ServiceState::from_config(&config, corpus)?;

    match generated {
        Some(token) => announce_development_token(&token, &mut std::io::stderr())?,
        None => info!(
            token_count = config.access_tokens.len(),
            "Access tokens loaded from environment"
        ),
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Span with the path only; the query string may carry a token.
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::debug_span!("http", method = %request.method(), path = %request.uri().path())
    });

    let app = create_router(state)
        .layer(trace)
        .layer(cors);

    let addr = config.socket_addr()?;
    info!(
        address = %addr,
        version = version,
        auth_timeout_ms = config.auth_timeout.as_millis() as u64,
        "Lexicon Service listening"
    );

    let listener = TcpListener::bind(addr).await?;

    info!("Ready to accept connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Lexicon Service shutdown complete");

    Ok(())
}
