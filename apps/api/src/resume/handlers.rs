use anyhow::anyhow;
use axum::{extract::Multipart, Json};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::extract::extract_resume_text;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub resume_text: String,
}

/// POST /api/v1/resume/extract
/// Multipart form with the PDF in a `file` field.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        // pdf-extract is CPU-bound.
        let resume_text = tokio::task::spawn_blocking(move || extract_resume_text(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow!("PDF extraction task failed: {e}")))??;

        info!("Extracted {} chars from {file_name}", resume_text.len());
        return Ok(Json(ExtractResponse { resume_text }));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}
