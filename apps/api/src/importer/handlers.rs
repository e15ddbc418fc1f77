//! Axum route handlers for the Import API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::ats::{evaluate, AtsReport};
use crate::errors::AppError;
use crate::importer::{import_pdf, import_text};
use crate::models::resume::PartialResumeRecord;
use crate::state::AppState;

/// Multipart field carrying the PDF. Any other first field is accepted as a fallback.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ImportTextRequest {
    pub text: String,
}

/// POST /api/v1/import/pdf
///
/// Multipart upload of a PDF resume. Returns the partially filled record for the
/// caller to merge into its editable state.
pub async fn handle_import_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PartialResumeRecord>, AppError> {
    let pdf = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    info!(bytes = pdf.len(), "Importing PDF resume");

    let record = import_pdf(state.extractor.as_ref(), pdf).await?;
    Ok(Json(record))
}

/// POST /api/v1/import/text
///
/// Runs the same heuristics over already-extracted text.
pub async fn handle_import_text(
    Json(request): Json<ImportTextRequest>,
) -> Result<Json<PartialResumeRecord>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(Json(import_text(&request.text)))
}

/// POST /api/v1/ats/check
pub async fn handle_ats_check(Json(record): Json<PartialResumeRecord>) -> Json<AtsReport> {
    Json(evaluate(&record))
}

async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<Bytes, AppError> {
    let mut fallback: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let data = field.bytes().await.map_err(multipart_error)?;

        if data.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "PDF is {} bytes; the limit is {limit}",
                data.len()
            )));
        }
        if is_file_field {
            fallback = Some(data);
            break;
        }
        if fallback.is_none() {
            fallback = Some(data);
        }
    }

    match fallback {
        None => Err(AppError::Validation(format!(
            "multipart body must contain a '{FILE_FIELD}' field"
        ))),
        Some(data) if data.is_empty() => {
            Err(AppError::Validation("uploaded file is empty".to_string()))
        }
        Some(data) => Ok(data),
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
