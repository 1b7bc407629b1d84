//! Query-text embedding.
//!
//! The dump engine stores vectors but cannot compute them; query texts are
//! sent to an embedding service first.

use serde::{Deserialize, Serialize};
use vecpeek_core::{Error, Result};

/// Turns text into a vector in the same space as the stored embeddings.
pub trait Embedder {
    /// Embeds a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

impl<T: Embedder + ?Sized> Embedder for Box<T> {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        (**self).embed(text)
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f64>,
}

/// Embeds text with a local Ollama server (`POST /api/embeddings`).
///
/// Each call builds its own blocking client. `embed` must not be called
/// from an async task; use `spawn_blocking`.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    url: String,
    model: String,
}

impl OllamaEmbedder {
    pub const DEFAULT_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "nomic-embed-text";

    /// Creates an embedder for `model` served at `url`.
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Returns the server base URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/api/embeddings", self.url)
    }
}

impl Default for OllamaEmbedder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL, Self::DEFAULT_MODEL)
    }
}

impl Embedder for OllamaEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        tracing::debug!(model = %self.model, chars = text.len(), "requesting embedding");

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(self.endpoint())
            .json(&EmbedRequest {
                model: &self.model,
                prompt: text,
            })
            .send()
            .map_err(|e| Error::Engine(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Engine(format!(
                "embedding service returned {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .map_err(|e| Error::Engine(format!("invalid embedding response: {}", e)))?;

        Ok(body.embedding.into_iter().map(|x| x as f32).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let embedder = OllamaEmbedder::default();
        assert_eq!(embedder.endpoint(), "http://localhost:11434/api/embeddings");
        assert_eq!(embedder.model(), "nomic-embed-text");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let embedder = OllamaEmbedder::new("http://gpu-box:11434/", "mxbai-embed-large");
        assert_eq!(embedder.url(), "http://gpu-box:11434");
        assert_eq!(embedder.endpoint(), "http://gpu-box:11434/api/embeddings");
    }

    #[test]
    fn test_request_shape() {
        let body = serde_json::to_value(EmbedRequest {
            model: "m",
            prompt: "hello",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"model": "m", "prompt": "hello"}));
    }

    #[test]
    fn test_malformed_url_is_engine_error() {
        // Fails while building the request, before any connection.
        let embedder = OllamaEmbedder::new("no scheme here", "m");
        match embedder.embed("hello") {
            Err(Error::Engine(message)) => assert!(message.contains("embedding request failed")),
            other => panic!("expected engine error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_shape() {
        let body: EmbedResponse =
            serde_json::from_value(serde_json::json!({"embedding": [0.5, -1.0]})).unwrap();
        assert_eq!(body.embedding, vec![0.5, -1.0]);
    }
}
