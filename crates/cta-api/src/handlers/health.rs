//! Health check.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::AppState;

/// Report service version, external tool availability, and summarizer settings.
///
/// Always 200; `status` is `degraded` when an extraction tool is missing.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let extractors = state.analyzer.resolver().health_check_all().await;
    let healthy = extractors.values().all(|ok| *ok);
    let summarizer = state.analyzer.summarizer();

    Json(serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "extractors": extractors,
        "summarizer": {
            "model": summarizer.model_name(),
            "prompt_mode": summarizer.mode(),
        },
        "payment_strategy": state.analyzer.default_strategy(),
        "cache": state.analyzer.cache_stats().await,
    }))
}
