//! Knowledge context injection for the latest user message.

use concierge_knowledge::KnowledgeEntry;

/// Builds the augmented user message sent on the first model turn.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    reference_date: String,
}

impl PromptBuilder {
    pub fn new(reference_date: impl Into<String>) -> Self {
        Self {
            reference_date: reference_date.into(),
        }
    }

    pub fn reference_date(&self) -> &str {
        &self.reference_date
    }

    /// Instruction placed ahead of the retrieved context.
    pub fn system_instruction(&self) -> String {
        format!(
            "You are a helpful booking assistant. Today's date is {}. \
             Here is some information that might be relevant to the user's question:",
            self.reference_date
        )
    }

    /// Prepend the instruction and context to `user_text`.
    ///
    /// Without context entries the user text is returned unchanged.
    pub fn augment(&self, user_text: &str, context: Option<&[KnowledgeEntry]>) -> String {
        match context {
            Some(entries) if !entries.is_empty() => format!(
                "{}\n\n{}\n\nUser question: {}",
                self.system_instruction(),
                format_context(entries),
                user_text
            ),
            _ => user_text.to_string(),
        }
    }
}

/// Render entries as `Question:`/`Answer:` blocks separated by a blank line.
pub fn format_context(entries: &[KnowledgeEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("Question: {}\nAnswer: {}", e.question, e.answer))
        .collect::<Vec<_>>()
        .join("\n\n")
}
