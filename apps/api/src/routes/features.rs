//! Axum route handler for the Feature-run API: the streaming relay.
//!
//! All rejections (missing fields, unknown feature, unknown resume) happen
//! before the response commits to streaming; after that point there is no
//! way to change the status, so backend faults are written in-band as a
//! plainly marked error trailer.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use bytes::Bytes;
use futures_util::StreamExt;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::features::compose;
use crate::ollama::Fragment;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunFeatureRequest {
    pub resume_id: Option<String>,
    pub feature_name: Option<String>,
}

/// POST /api/v1/features/run
///
/// Runs a named feature against a stored resume's text and relays the
/// model's output as a live plain-text stream. Fragments are forwarded
/// verbatim, in backend order, with no buffering beyond the fragment
/// channel. If the caller disconnects, dropping the body drops the
/// fragment stream, which releases the backend connection.
pub async fn handle_run_feature(
    State(state): State<AppState>,
    Json(request): Json<RunFeatureRequest>,
) -> Result<Response, AppError> {
    let (resume_id, feature_name) = match (request.resume_id, request.feature_name) {
        (Some(r), Some(f)) if !r.is_empty() && !f.is_empty() => (r, f),
        _ => {
            return Err(AppError::Validation(
                "Resume ID and feature name are required".to_string(),
            ))
        }
    };

    let template = state
        .features
        .lookup(&feature_name)
        .ok_or_else(|| AppError::NotFound("Feature not found".to_string()))?;

    let resume_text = state
        .store
        .get_document_text(&resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    info!("Running feature '{feature_name}' on resume {resume_id}");

    let prompt = compose(template, &resume_text);
    let fragments = state.ollama.generate(prompt);

    let body = Body::from_stream(fragments.filter_map(|fragment| async move {
        match fragment {
            Fragment::Data(text) => Some(Ok::<_, Infallible>(Bytes::from(text))),
            Fragment::End => None,
            Fragment::Error(diagnostic) => {
                Some(Ok(Bytes::from(format!("\n\n--- ERROR ---\n{diagnostic}"))))
            }
        }
    }));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(body)
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))
}
