//! Loading the static knowledge-base file.
//!
//! The file is a JSON array of objects, each carrying string `question` and
//! `answer` fields. Other fields are ignored.

use std::path::Path;

use serde_json::Value;

use crate::errors::{KnowledgeError, KnowledgeResult};
use crate::models::KnowledgeEntry;

/// Read and validate the knowledge base at `path`, preserving record order.
pub async fn load_knowledge_base(path: &Path) -> KnowledgeResult<Vec<KnowledgeEntry>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| KnowledgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    parse_knowledge_base(&raw)
}

/// Parse knowledge-base JSON text.
pub fn parse_knowledge_base(raw: &str) -> KnowledgeResult<Vec<KnowledgeEntry>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| KnowledgeError::Malformed(e.to_string()))?;

    let Value::Array(records) = value else {
        return Err(KnowledgeError::Malformed(
            "expected a JSON array of {question, answer} objects".to_string(),
        ));
    };

    records
        .iter()
        .enumerate()
        .map(|(position, record)| parse_record(position, record))
        .collect()
}

fn parse_record(position: usize, record: &Value) -> KnowledgeResult<KnowledgeEntry> {
    let Some(object) = record.as_object() else {
        return Err(KnowledgeError::Malformed(format!(
            "record {position} is not an object"
        )));
    };

    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                KnowledgeError::Malformed(format!(
                    "record {position} has no string field `{name}`"
                ))
            })
    };

    Ok(KnowledgeEntry {
        question: field("question")?,
        answer: field("answer")?,
    })
}
