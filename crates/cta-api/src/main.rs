//! cta-api server binary.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::http::{header, Method};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use cta_analysis::{Analyzer, AnalyzerConfig};
use cta_api::{router, AppState};
use cta_core::defaults::{CORS_MAX_AGE_SECS, MAX_UPLOAD_BYTES, SERVER_PORT};
use cta_extract::TextResolver;

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// LOGGING
// =============================================================================

const DEFAULT_LOG_FILTER: &str = "cta_api=debug,cta_analysis=debug,tower_http=debug";

/// Log output settings.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file, rotated daily (optional)
///   LOG_ANSI    - "true"/"false" override ANSI colors (off for files)
///   RUST_LOG    - standard env filter
struct LogConfig {
    json: bool,
    file: Option<PathBuf>,
    ansi: Option<bool>,
}

impl LogConfig {
    fn from_env() -> Self {
        Self {
            json: std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")),
            file: std::env::var("LOG_FILE").ok().map(PathBuf::from),
            ansi: std::env::var("LOG_ANSI").ok().map(|v| v == "true" || v == "1"),
        }
    }

    /// Install the global subscriber. The returned guard must be held for
    /// file output to keep flushing.
    fn init(&self) -> Option<WorkerGuard> {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

        let (writer, guard) = match &self.file {
            Some(path) => {
                let dir = path.parent().unwrap_or(Path::new("."));
                let name = path
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("cta-api.log");
                let (non_blocking, guard) =
                    tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
                (BoxMakeWriter::new(non_blocking), Some(guard))
            }
            None => (BoxMakeWriter::new(std::io::stdout), None),
        };

        let layer = tracing_subscriber::fmt::layer().with_writer(writer);
        let registry = tracing_subscriber::registry().with(env_filter);
        if self.json {
            registry.with(layer.json()).init();
        } else {
            let ansi = self.ansi.unwrap_or(self.file.is_none());
            registry.with(layer.with_ansi(ansi)).init();
        }
        guard
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let log_config = LogConfig::from_env();
    let _log_guard = log_config.init();
    info!(
        json = log_config.json,
        log_file = ?log_config.file,
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(SERVER_PORT);
    let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(MAX_UPLOAD_BYTES);

    let resolver = TextResolver::from_env();
    for (tool, available) in resolver.health_check_all().await {
        if available {
            info!(tool = %tool, "Extraction tool available");
        } else {
            warn!(tool = %tool, "Extraction tool not found on PATH");
        }
    }

    let backend = cta_inference::backend_from_env()?;
    let analyzer = Analyzer::new(resolver, backend, AnalyzerConfig::from_env()?);
    let state = AppState::new(analyzer);

    let app = router(state, max_upload_bytes).layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                    .max_age(Duration::from_secs(CORS_MAX_AGE_SECS)),
            ),
    );

    // Start server
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(max_upload_bytes, "Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
