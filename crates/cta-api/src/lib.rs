//! # cta-api
//!
//! HTTP surface for the CTA analyzer: upload one agreement, receive the
//! review report or one of its downloadable artifacts.

pub mod handlers;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use cta_analysis::Analyzer;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

/// Build the API router. Uploads larger than `max_upload_bytes` are rejected
/// with 413.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/analyze", post(handlers::analyze::analyze_document))
        .route(
            "/api/v1/analyze/summary.txt",
            post(handlers::analyze::download_summary),
        )
        .route(
            "/api/v1/analyze/clauses.xlsx",
            post(handlers::analyze::download_clause_report),
        )
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .with_state(state)
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// Unreadable upload or bad form field.
    BadRequest(String),
    /// The document was accepted but its text could not be resolved.
    Unprocessable(String),
    /// The summarization backend failed.
    BadGateway(String),
    Internal(String),
}

impl From<cta_core::Error> for ApiError {
    fn from(err: cta_core::Error) -> Self {
        use cta_core::Error;
        match err {
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Extraction(msg) => ApiError::Unprocessable(msg),
            Error::Summarization(e) => ApiError::BadGateway(format!("Summarization failed: {}", e)),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cta_core::{Error, SummarizationError};

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            ApiError::from(Error::InvalidInput("x".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Extraction("x".into())),
            ApiError::Unprocessable(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Summarization(SummarizationError::EmptyInput)),
            ApiError::BadGateway(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Export("x".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Unprocessable("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ApiError::BadGateway("x".into()), StatusCode::BAD_GATEWAY),
            (ApiError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
