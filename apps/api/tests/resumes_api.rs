//! End-to-end tests for the upload and listing endpoints.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt;

use resume_api::db;
use resume_api::features::FeatureRegistry;
use resume_api::ollama::OllamaClient;
use resume_api::routes::build_router;
use resume_api::state::AppState;
use resume_api::store::{DocumentStore, SqliteStore};

const BOUNDARY: &str = "X-TEST-BOUNDARY";

async fn app() -> (Router, Arc<SqliteStore>) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    let store = Arc::new(SqliteStore::new(pool));

    let state = AppState {
        store: store.clone(),
        ollama: OllamaClient::new(
            "http://localhost:11434/api/generate".to_string(),
            "test-model".to_string(),
        ),
        features: Arc::new(FeatureRegistry::builtin().unwrap()),
    };
    (build_router(state), store)
}

fn multipart_upload(field_name: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/api/v1/resumes")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_txt_stores_extracted_text() {
    let (app, store) = app().await;

    let response = app
        .oneshot(multipart_upload("resume", "jane.txt", "Jane Doe, engineer"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let id = json["id"].as_str().unwrap();
    assert!(json["message"].as_str().unwrap().contains("jane.txt"));

    let text = store.get_document_text(id).await.unwrap();
    assert_eq!(text.as_deref(), Some("Jane Doe, engineer"));
}

#[tokio::test]
async fn list_returns_uploaded_resumes() {
    let (app, store) = app().await;
    store.insert_resume("r1", "jane.txt", "text").await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/resumes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "r1");
    assert_eq!(list[0]["filename"], "jane.txt");
}

#[tokio::test]
async fn unsupported_file_type_rejected() {
    let (app, _store) = app().await;

    let response = app
        .oneshot(multipart_upload("resume", "jane.docx", "binary-ish"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_resume_field_rejected() {
    let (app, _store) = app().await;

    let response = app
        .oneshot(multipart_upload("attachment", "jane.txt", "text"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
