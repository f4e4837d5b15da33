//! Document Store Access — the persistence seam for resume records.
//!
//! Handlers depend on the `DocumentStore` trait, carried in `AppState` as an
//! `Arc<dyn DocumentStore>`, so tests can substitute the backing store
//! without touching endpoint code.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::resume::ResumeSummary;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores a resume with its extracted full text.
    async fn insert_resume(&self, id: &str, filename: &str, full_text: &str)
        -> Result<(), AppError>;

    /// All stored resumes, newest first.
    async fn list_resumes(&self) -> Result<Vec<ResumeSummary>, AppError>;

    /// The extracted text for one resume, or `None` if the id is unknown.
    /// Fetched fresh per request; there is no caching layer.
    async fn get_document_text(&self, id: &str) -> Result<Option<String>, AppError>;
}

/// SQLite-backed store over the shared connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert_resume(
        &self,
        id: &str,
        filename: &str,
        full_text: &str,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO resumes (id, filename, full_text, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(id)
            .bind(filename)
            .bind(full_text)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeSummary>, AppError> {
        let resumes = sqlx::query_as::<_, ResumeSummary>(
            "SELECT id, filename FROM resumes ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(resumes)
    }

    async fn get_document_text(&self, id: &str) -> Result<Option<String>, AppError> {
        let text = sqlx::query_scalar::<_, String>("SELECT full_text FROM resumes WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_store() -> SqliteStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::migrate(&pool).await.unwrap();
        SqliteStore::new(pool)
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = memory_store().await;
        store
            .insert_resume("r1", "jane.pdf", "ten years of Rust")
            .await
            .unwrap();

        let text = store.get_document_text("r1").await.unwrap();
        assert_eq!(text.as_deref(), Some("ten years of Rust"));
    }

    #[tokio::test]
    async fn unknown_id_returns_none() {
        let store = memory_store().await;
        assert!(store.get_document_text("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = memory_store().await;
        store.insert_resume("r1", "old.txt", "a").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        store.insert_resume("r2", "new.txt", "b").await.unwrap();

        let resumes = store.list_resumes().await.unwrap();
        let names: Vec<&str> = resumes.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["new.txt", "old.txt"]);
    }
}
