//! Knowledge index for concierge: question/answer pairs searchable by
//! embedding similarity.

pub mod embeddings;
pub mod errors;
pub mod index;
pub mod models;
pub mod search;
pub mod sources;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use concierge_core::config::KnowledgeSettings;
pub use embeddings::{Embedder, EmbeddingClient};
pub use errors::{KnowledgeError, KnowledgeResult};
pub use index::FlatL2Index;
pub use models::{KnowledgeEntry, ScoredEntry};
pub use search::{KnowledgeIndex, RELEVANCE_THRESHOLD};
