//! Axum route handlers for the Resume API: upload and listing.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_text;
use crate::models::resume::ResumeSummary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub id: String,
}

/// POST /api/v1/resumes
///
/// Multipart upload with a single `resume` file field (PDF or TXT).
/// The text is extracted in memory and stored; the raw file is discarded.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut upload: Option<(String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart request: {e}")))?
    {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
        }
    }

    let (filename, data) = upload
        .ok_or_else(|| AppError::Validation("No file part in the request".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let full_text = extract_text(&filename, &data)?;

    let id = Uuid::new_v4().to_string();
    state.store.insert_resume(&id, &filename, &full_text).await?;

    info!("Successfully processed and stored resume: {filename}");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: format!("Successfully uploaded and processed {filename}"),
            id,
        }),
    ))
}

/// GET /api/v1/resumes
///
/// All stored resumes, newest first.
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeSummary>>, AppError> {
    let resumes = state.store.list_resumes().await?;
    Ok(Json(resumes))
}
