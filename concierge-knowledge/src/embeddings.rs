use std::time::Duration;

use serde::Deserialize;

use crate::KnowledgeSettings;
use crate::errors::{KnowledgeError, KnowledgeResult};

/// Turns text into fixed-dimension vectors.
///
/// The same embedder must be used for indexing and for queries, otherwise
/// distances are meaningless.
#[async_trait::async_trait]
pub trait Embedder: Send + Sync {
    /// Embed every input, returning one vector per input in the same order.
    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>>;

    /// Embed a single input.
    async fn embed(&self, input: &str) -> KnowledgeResult<Vec<f32>> {
        let mut vectors = self.embed_batch(&[input.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| KnowledgeError::Embedding("embedding response missing vectors".into()))
    }
}

/// Client for an Ollama-compatible `/api/embed` endpoint.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl EmbeddingClient {
    pub fn new(settings: &KnowledgeSettings) -> KnowledgeResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            base_url: settings.embedding_url.trim_end_matches('/').to_string(),
            model: settings.embedding_model.clone(),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl Embedder for EmbeddingClient {
    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: self.model.clone(),
            input: inputs.to_vec(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::Embedding(format!(
                "embedding request failed: {status} {text}"
            )));
        }

        let payload: EmbedResponse = response.json().await?;

        let vectors = if let Some(embeddings) = payload.embeddings {
            embeddings
        } else if let Some(embedding) = payload.embedding {
            vec![embedding]
        } else {
            return Err(KnowledgeError::Embedding(
                "embedding response missing vectors".to_string(),
            ));
        };

        if vectors.len() != inputs.len() {
            return Err(KnowledgeError::Embedding(format!(
                "expected {} embeddings, got {}",
                inputs.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embeddings: Option<Vec<Vec<f32>>>,
    embedding: Option<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> EmbeddingClient {
        let settings = KnowledgeSettings {
            embedding_url: format!("{}/", server.base_url()),
            embedding_model: "test-embed".to_string(),
            ..KnowledgeSettings::default()
        };
        EmbeddingClient::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn embed_batch_returns_vectors_in_order() {
        let server = MockServer::start_async().await;

        let embed_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embed").matches(|req| {
                    let body: serde_json::Value =
                        serde_json::from_slice(req.body().as_ref()).unwrap();
                    body["model"] == "test-embed" && body["input"] == json!(["a", "b"])
                });
                then.status(200).json_body(json!({
                    "embeddings": [[0.0, 1.0], [1.0, 0.0]]
                }));
            })
            .await;

        let vectors = client(&server)
            .embed_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert_eq!(vectors, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        embed_mock.assert_async().await;
    }

    #[tokio::test]
    async fn embed_accepts_legacy_single_vector() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embed");
                then.status(200).json_body(json!({ "embedding": [0.5, 0.5] }));
            })
            .await;

        let vector = client(&server).embed("hello").await.unwrap();
        assert_eq!(vector, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn embed_reports_http_failure() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embed");
                then.status(500).body("model not loaded");
            })
            .await;

        let err = client(&server).embed("hello").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model not loaded"));
    }

    #[tokio::test]
    async fn embed_rejects_count_mismatch() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/embed");
                then.status(200).json_body(json!({ "embeddings": [[1.0]] }));
            })
            .await;

        let err = client(&server)
            .embed_batch(&["a".to_string(), "b".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, KnowledgeError::Embedding(_)));
    }

    #[tokio::test]
    async fn empty_batch_skips_request() {
        let server = MockServer::start_async().await;
        let vectors = client(&server).embed_batch(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }
}
