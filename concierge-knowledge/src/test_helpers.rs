//! Deterministic embedder for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::embeddings::Embedder;
use crate::errors::{KnowledgeError, KnowledgeResult};

/// Embedder backed by a fixed text → vector table.
///
/// Unknown texts fail with [`KnowledgeError::Embedding`], which lets tests
/// exercise embedding failures.
#[derive(Debug, Default)]
pub struct StaticEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Number of `embed_batch` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Embedder for StaticEmbedder {
    async fn embed_batch(&self, inputs: &[String]) -> KnowledgeResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        inputs
            .iter()
            .map(|input| {
                self.vectors
                    .get(input)
                    .cloned()
                    .ok_or_else(|| KnowledgeError::Embedding(format!("no vector for {input:?}")))
            })
            .collect()
    }
}
