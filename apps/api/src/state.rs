use std::sync::Arc;

use crate::features::FeatureRegistry;
use crate::ollama::OllamaClient;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store seam. Default: `SqliteStore`; tests may substitute.
    pub store: Arc<dyn DocumentStore>,
    pub ollama: OllamaClient,
    /// Immutable after startup; safe for unsynchronized concurrent reads.
    pub features: Arc<FeatureRegistry>,
}
