//! Ollama client — the single point of entry for generation calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the model backend
//! directly. All generation goes through `OllamaClient::generate`, which
//! returns a lazy, forward-only `FragmentStream`.
//!
//! Wire contract: `POST <endpoint>` with body `{"model", "prompt",
//! "stream": true}`; the backend answers with newline-delimited JSON
//! objects whose `response` field carries the next text increment.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::{Stream, TryStreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tracing::{debug, error, warn};

/// Bounded so a slow caller backpressures the backend read instead of
/// buffering the whole generation in memory.
const FRAGMENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// One newline-delimited JSON object from the backend. Unknown fields
/// (`done`, timings, context) are ignored.
#[derive(Debug, Deserialize)]
struct GenerateChunk {
    response: Option<String>,
}

/// One pull from the backend stream. Exactly one terminal variant (`End` or
/// `Error`) is produced per stream, after which no further fragments follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// The next text increment, to be forwarded verbatim.
    Data(String),
    /// Clean end of generation.
    End,
    /// Terminal fault with a human-readable diagnostic. Emitted for connect
    /// failures, non-success statuses, and mid-stream read errors.
    Error(String),
}

/// A live generation stream. Not restartable; a retry needs a new call to
/// `generate`. Dropping it aborts the producer task, which releases the
/// backend connection, so an early-departing consumer never leaves an
/// orphaned generation running.
pub struct FragmentStream {
    rx: mpsc::Receiver<Fragment>,
    task: tokio::task::JoinHandle<()>,
}

impl FragmentStream {
    pub async fn recv(&mut self) -> Option<Fragment> {
        self.rx.recv().await
    }
}

impl Stream for FragmentStream {
    type Item = Fragment;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Fragment>> {
        self.rx.poll_recv(cx)
    }
}

impl Drop for FragmentStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    /// No request timeout beyond the connection library's defaults:
    /// generations are long-lived and an overall deadline would cut healthy
    /// streams short.
    pub fn new(endpoint: String, model: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            model,
        }
    }

    /// Opens a streaming generation request and returns the fragment stream.
    /// Connection failures surface as a single `Fragment::Error` on the
    /// stream, never as a panic or an early return.
    pub fn generate(&self, prompt: String) -> FragmentStream {
        let (tx, rx) = mpsc::channel(FRAGMENT_CHANNEL_CAPACITY);
        let task = tokio::spawn(run_generation(
            self.client.clone(),
            self.endpoint.clone(),
            self.model.clone(),
            prompt,
            tx,
        ));
        FragmentStream { rx, task }
    }
}

async fn run_generation(
    client: Client,
    endpoint: String,
    model: String,
    prompt: String,
    tx: mpsc::Sender<Fragment>,
) {
    let request = GenerateRequest {
        model: model.clone(),
        prompt,
        stream: true,
    };

    let response = match client.post(&endpoint).json(&request).send().await {
        Ok(response) => response,
        Err(e) => {
            error!("Failed to connect to Ollama at {endpoint}: {e}");
            let _ = tx.send(Fragment::Error(backend_diagnostic(&endpoint, &model))).await;
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        error!("Ollama at {endpoint} returned {status}");
        let _ = tx.send(Fragment::Error(backend_diagnostic(&endpoint, &model))).await;
        return;
    }

    debug!("Streaming generation from {endpoint} (model: {model})");

    let byte_stream = response.bytes_stream().map_err(io::Error::other);
    let mut lines = BufReader::new(StreamReader::new(byte_stream)).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match serde_json::from_str::<GenerateChunk>(&line) {
                Ok(chunk) => {
                    if let Some(text) = chunk.response {
                        if tx.send(Fragment::Data(text)).await.is_err() {
                            // Consumer is gone; stop reading the backend.
                            return;
                        }
                    }
                }
                // Malformed backend output is not fatal to the stream; some
                // backends emit stray non-JSON lines.
                Err(_) => warn!("Could not decode JSON line from backend: {line}"),
            },
            Ok(None) => break,
            Err(e) => {
                error!("Error reading generation stream from {endpoint}: {e}");
                let _ = tx.send(Fragment::Error(backend_diagnostic(&endpoint, &model))).await;
                return;
            }
        }
    }

    let _ = tx.send(Fragment::End).await;
}

fn backend_diagnostic(endpoint: &str, model: &str) -> String {
    format!(
        "Failed to connect to the local AI model at {endpoint}.\n\
         Please ensure Ollama is running and the model '{model}' is available."
    )
}
