pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
pub mod features;
pub mod models;
pub mod ollama;
pub mod routes;
pub mod state;
pub mod store;
