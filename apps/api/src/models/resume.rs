#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored resume with its extracted text.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: String,
    pub filename: String,
    pub full_text: String,
    pub created_at: DateTime<Utc>,
}

/// Listing view of a resume. The full text is deliberately omitted; it is
/// only fetched per feature-run request.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeSummary {
    pub id: String,
    pub filename: String,
}
