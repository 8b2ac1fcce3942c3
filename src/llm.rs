//! Text-completion client for the Ollama backend.
//!
//! The agent treats the model as an opaque oracle: a prompt goes in, free
//! text comes out. `CompletionClient` is the seam that makes the loop
//! testable without a live model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the completion backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Ollama request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// An opaque text-completion oracle.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete a prompt and return the model's raw reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for Ollama's `/api/generate` endpoint.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// `timeout` bounds each completion call wall-clock; the iteration
    /// bound alone does not protect against a hung backend.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl CompletionClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}
