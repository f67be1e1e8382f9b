//! Knowledge index: the knowledge base joined with its vector index.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::KnowledgeSettings;
use crate::embeddings::{Embedder, EmbeddingClient};
use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::index::FlatL2Index;
use crate::models::{KnowledgeEntry, ScoredEntry};
use crate::sources::load_knowledge_base;

/// Squared L2 distance above which the closest match is considered
/// unrelated to the query.
///
/// Tied to the embedding model's vector scale; re-derive it when the
/// embedding model changes.
pub const RELEVANCE_THRESHOLD: f32 = 1.0;

/// Immutable, query-only view of the knowledge base.
///
/// Position `i` of the index is always `entries[i]`. Safe to share between
/// concurrent requests without locking.
pub struct KnowledgeIndex {
    entries: Vec<KnowledgeEntry>,
    index: FlatL2Index,
    embedder: Arc<dyn Embedder>,
    threshold: f32,
}

impl KnowledgeIndex {
    /// Build the index from configured settings, using the HTTP embedder.
    pub async fn open(settings: &KnowledgeSettings) -> KnowledgeResult<Self> {
        let embedder = Arc::new(EmbeddingClient::new(settings)?);
        let index = Self::build(&settings.path, embedder).await?;
        Ok(index.with_threshold(settings.relevance_threshold))
    }

    /// Load the knowledge base at `path` and index every question.
    pub async fn build(path: &Path, embedder: Arc<dyn Embedder>) -> KnowledgeResult<Self> {
        let entries = load_knowledge_base(path).await?;
        info!(
            "Loaded {} knowledge entries from {}",
            entries.len(),
            path.display()
        );
        Self::from_entries(entries, embedder).await
    }

    /// Index already-loaded entries.
    ///
    /// Questions are embedded in one batch. An empty knowledge base is
    /// rejected because no index can be built over zero vectors.
    pub async fn from_entries(
        entries: Vec<KnowledgeEntry>,
        embedder: Arc<dyn Embedder>,
    ) -> KnowledgeResult<Self> {
        if entries.is_empty() {
            return Err(KnowledgeError::EmptyKnowledgeBase);
        }

        let questions: Vec<String> = entries.iter().map(|e| e.question.clone()).collect();
        let vectors = embedder.embed_batch(&questions).await?;
        if vectors.len() != entries.len() {
            return Err(KnowledgeError::Embedding(format!(
                "expected {} embeddings, got {}",
                entries.len(),
                vectors.len()
            )));
        }

        let index = FlatL2Index::build(vectors)?;
        info!(
            "Built flat L2 index over {} vectors (dim {})",
            index.len(),
            index.dim()
        );

        Ok(Self {
            entries,
            index,
            embedder,
            threshold: RELEVANCE_THRESHOLD,
        })
    }

    /// Override the relevance threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.index.dim()
    }

    /// Up to `k` relevant entries, closest first, or `None` when nothing is
    /// close enough.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
    ) -> KnowledgeResult<Option<Vec<KnowledgeEntry>>> {
        Ok(self
            .search_scored(query, k)
            .await?
            .map(|hits| hits.into_iter().map(|hit| hit.entry).collect()))
    }

    /// Like [`search`](Self::search), keeping positions and distances.
    ///
    /// Only the closest hit is checked against the threshold; the remaining
    /// hits are returned as ranked.
    pub async fn search_scored(
        &self,
        query: &str,
        k: usize,
    ) -> KnowledgeResult<Option<Vec<ScoredEntry>>> {
        if k == 0 {
            return Ok(None);
        }

        let vector = self.embedder.embed(query).await?;
        let neighbors = self.index.search(&vector, k)?;

        let Some(closest) = neighbors.first() else {
            return Ok(None);
        };
        if closest.distance > self.threshold {
            debug!(
                distance = closest.distance,
                threshold = self.threshold,
                "closest knowledge entry above relevance threshold"
            );
            return Ok(None);
        }

        Ok(Some(
            neighbors
                .into_iter()
                .map(|n| ScoredEntry {
                    position: n.id,
                    distance: n.distance,
                    entry: self.entries[n.id].clone(),
                })
                .collect(),
        ))
    }
}
