//! Document analysis handlers.
//!
//! All three endpoints accept the same multipart form:
//! - `file`: the agreement PDF (required)
//! - `payment_strategy`: `generic`, `document_specific`, or `combined` (optional)

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::info;

use cta_analysis::{clause_workbook, summary_artifact};
use cta_core::defaults::{CLAUSE_REPORT_FILE_NAME, SUMMARY_FILE_NAME};
use cta_core::{AnalysisReport, PaymentStrategy, SummaryOutcome};

use crate::{ApiError, AppState};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const DEFAULT_FILENAME: &str = "document.pdf";

/// Parsed multipart upload.
struct Upload {
    data: Vec<u8>,
    filename: String,
    strategy: Option<PaymentStrategy>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    let mut data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut strategy: Option<PaymentStrategy> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                filename = field.file_name().map(|f| f.to_string());
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                        .to_vec(),
                );
            }
            Some("payment_strategy") => {
                let val = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
                if !val.trim().is_empty() {
                    strategy = Some(
                        val.parse()
                            .map_err(|e: cta_core::Error| ApiError::BadRequest(e.to_string()))?,
                    );
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let data = data.ok_or_else(|| ApiError::BadRequest("Missing file in multipart form".into()))?;
    if data.is_empty() {
        return Err(ApiError::BadRequest("Uploaded file is empty".into()));
    }

    Ok(Upload {
        data,
        filename: filename
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
        strategy,
    })
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<Arc<AnalysisReport>, ApiError> {
    let upload = read_upload(multipart).await?;
    info!(
        filename = %upload.filename,
        size = upload.data.len(),
        payment_strategy = ?upload.strategy,
        "Analyzing upload"
    );
    Ok(state
        .analyzer
        .analyze(&upload.data, &upload.filename, upload.strategy)
        .await?)
}

fn attachment(content_type: &str, file_name: &str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

/// Analyze an uploaded agreement.
///
/// # Returns
/// - 200 OK with the full report (a failed summary is reported inside it)
/// - 400 Bad Request if the file is missing, empty, or not a PDF
/// - 422 Unprocessable Entity if text extraction fails
pub async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = run_analysis(&state, multipart).await?;
    Ok(Json(report.as_ref().clone()))
}

/// Analyze an upload and return the timestamped summary as `cta_summary.txt`.
///
/// Responds 502 with the diagnostic when summarization failed.
pub async fn download_summary(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let report = run_analysis(&state, multipart).await?;
    match &report.summary {
        SummaryOutcome::Generated { text, .. } => Ok(attachment(
            "text/plain; charset=utf-8",
            SUMMARY_FILE_NAME,
            summary_artifact(text, report.generated_at),
        )),
        SummaryOutcome::Failed { error } => Err(ApiError::BadGateway(error.clone())),
    }
}

/// Analyze an upload and return the clause table as `cta_clauses.xlsx`.
pub async fn download_clause_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let report = run_analysis(&state, multipart).await?;
    let bytes = clause_workbook(&report.clause_table)?;
    Ok(attachment(XLSX_CONTENT_TYPE, CLAUSE_REPORT_FILE_NAME, bytes))
}
