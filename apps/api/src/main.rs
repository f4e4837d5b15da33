use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_api::config::Config;
use resume_api::db::create_pool;
use resume_api::features::FeatureRegistry;
use resume_api::ollama::OllamaClient;
use resume_api::routes::build_router;
use resume_api::state::AppState;
use resume_api::store::SqliteStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_api={0},api={0}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite (creates the database file and schema on first run)
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(SqliteStore::new(pool));

    // Feature registry; template placeholders are validated here, once
    let features = Arc::new(FeatureRegistry::builtin()?);
    info!("Feature registry loaded ({} features)", features.len());

    // Ollama client
    let ollama = OllamaClient::new(config.ollama_url.clone(), config.ollama_model.clone());
    info!(
        "Ollama client initialized (endpoint: {}, model: {})",
        config.ollama_url, config.ollama_model
    );

    let state = AppState {
        store,
        ollama,
        features,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
