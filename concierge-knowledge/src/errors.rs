use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("cannot read knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed knowledge base: {0}")]
    Malformed(String),
    #[error("knowledge base is empty")]
    EmptyKnowledgeBase,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    EmbeddingDimMismatch { expected: usize, actual: usize },
    #[error("embedding error: {0}")]
    Embedding(String),
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
