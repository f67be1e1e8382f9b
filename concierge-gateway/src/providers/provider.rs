//! Provider trait for abstracting the chat model backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::history::ChatMessage;
use crate::tools::Tool;

/// Unified content block across providers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderContentBlock {
    /// Text content
    Text { text: String },
    /// Function call requested by the model
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
}

/// Unified usage information across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Unified response type across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<ProviderContentBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<ProviderUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("No content in response")]
    NoContent,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl ProviderError {
    /// Whether the provider could not be reached or refused the request, as
    /// opposed to answering with something unusable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, ProviderError::HttpError(_) | ProviderError::ApiError { .. })
    }
}

/// Provider trait for different LLM backends
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Send a conversation and get response.
    ///
    /// `new_message`, when given, is appended to `history` as a user turn.
    async fn send_conversation(
        &self,
        history: Vec<ChatMessage>,
        tools: Vec<&dyn Tool>,
        new_message: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// Extract all text content from a response
pub fn extract_all_text(response: &ProviderResponse) -> String {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ProviderContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extract tool uses from a response
pub fn extract_tool_uses(response: &ProviderResponse) -> Vec<(String, String, Value)> {
    response
        .content
        .iter()
        .filter_map(|block| match block {
            ProviderContentBlock::ToolUse { id, name, input } => {
                Some((id.clone(), name.clone(), input.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Check if the response has tool uses
pub fn has_tool_uses(response: &ProviderResponse) -> bool {
    response
        .content
        .iter()
        .any(|block| matches!(block, ProviderContentBlock::ToolUse { .. }))
}
