//! Conversion between neutral chat history and Gemini API format.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::chat::history::{ChatContentBlock, ChatMessage, ChatRole};

/// Gemini API content structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

/// Gemini API content part
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
}

/// Gemini function call structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Value,
}

/// Gemini function response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// Convert neutral history to Gemini API format
pub fn to_gemini_contents(
    history: Vec<ChatMessage>,
    new_message: Option<&str>,
) -> Vec<GeminiContent> {
    let mut messages = history;

    if let Some(content) = new_message {
        messages.push(ChatMessage::text(ChatRole::User, content));
    }

    let mut contents = Vec::new();
    for msg in messages {
        let role = match msg.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
        };

        let parts: Vec<GeminiPart> = msg
            .content
            .into_iter()
            .map(|block| match block {
                ChatContentBlock::Text { text } => GeminiPart::Text { text },
                ChatContentBlock::ToolUse { id: _, name, input } => GeminiPart::FunctionCall {
                    function_call: FunctionCall { name, args: input },
                },
                ChatContentBlock::ToolResult {
                    tool_use_id: _,
                    name,
                    content,
                } => GeminiPart::FunctionResponse {
                    function_response: FunctionResponse {
                        name,
                        response: as_response_object(content),
                    },
                },
            })
            .collect();

        if !parts.is_empty() {
            contents.push(GeminiContent {
                role: role.to_string(),
                parts,
            });
        }
    }

    contents
}

/// Gemini requires `functionResponse.response` to be a JSON object.
fn as_response_object(content: Value) -> Value {
    if content.is_object() {
        content
    } else {
        json!({ "result": content })
    }
}
