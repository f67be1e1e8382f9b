//! Knowledge index configuration.
//!
//! Consumed by `concierge-knowledge` when the index is built at startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resolved knowledge settings (all values filled with defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// JSON file holding the `[{question, answer}]` knowledge base.
    #[serde(default = "default_knowledge_path")]
    pub path: PathBuf,
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Squared L2 distance above which the closest match is discarded.
    /// Depends on the embedding model's vector scale.
    #[serde(default = "default_relevance_threshold")]
    pub relevance_threshold: f32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            relevance_threshold: default_relevance_threshold(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_knowledge_path() -> PathBuf {
    PathBuf::from("knowledge_base.json")
}

fn default_embedding_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_embedding_model() -> String {
    "paraphrase-multilingual".to_string()
}

fn default_relevance_threshold() -> f32 {
    1.0
}

fn default_timeout_seconds() -> u64 {
    30
}
