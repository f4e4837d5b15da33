use anyhow::{Context, Result};

/// Application configuration loaded once at startup from environment variables.
/// Every value has a local-development default, so a bare `cargo run` works
/// against a stock Ollama install.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite:resumes.db"),
            ollama_url: env_or("OLLAMA_API_URL", "http://localhost:11434/api/generate"),
            ollama_model: env_or("OLLAMA_MODEL", "mistral:latest"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
