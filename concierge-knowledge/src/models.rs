use serde::{Deserialize, Serialize};

/// A single question/answer pair from the knowledge base.
///
/// Entries are identified by their position in the loaded sequence; that
/// position is also their id in the vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A search hit with its squared L2 distance to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    /// Position of the entry in the knowledge base
    pub position: usize,
    pub distance: f32,
    pub entry: KnowledgeEntry,
}
