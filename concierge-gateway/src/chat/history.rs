//! Provider-neutral chat history types and builders.

use concierge_core::{ConversationMessage, MessageRole};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role in provider-neutral chat history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl From<MessageRole> for ChatRole {
    fn from(role: MessageRole) -> Self {
        match role {
            MessageRole::User => ChatRole::User,
            MessageRole::Model => ChatRole::Assistant,
        }
    }
}

/// Content block in provider-neutral history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        #[serde(rename = "tool_use_id")]
        tool_use_id: String,
        /// Name of the tool that produced the result
        name: String,
        content: Value,
    },
}

/// Provider-neutral chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: Vec<ChatContentBlock>,
}

impl ChatMessage {
    pub fn text(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![ChatContentBlock::Text { text: text.into() }],
        }
    }
}

impl From<&ConversationMessage> for ChatMessage {
    fn from(msg: &ConversationMessage) -> Self {
        ChatMessage::text(msg.role.into(), msg.text.clone())
    }
}

/// Convert request history into chat messages, preserving order and roles.
pub fn build_history_messages(messages: &[ConversationMessage]) -> Vec<ChatMessage> {
    messages.iter().map(ChatMessage::from).collect()
}

/// Build the assistant turn that requested a tool call.
pub fn build_tool_use_message(id: &str, name: &str, input: Value) -> ChatMessage {
    ChatMessage {
        role: ChatRole::Assistant,
        content: vec![ChatContentBlock::ToolUse {
            id: id.to_string(),
            name: name.to_string(),
            input,
        }],
    }
}

/// Build the user turn carrying a tool's result back to the model.
pub fn build_tool_result_message(tool_use_id: &str, name: &str, content: Value) -> ChatMessage {
    ChatMessage {
        role: ChatRole::User,
        content: vec![ChatContentBlock::ToolResult {
            tool_use_id: tool_use_id.to_string(),
            name: name.to_string(),
            content,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_history_preserves_roles_and_order() {
        let messages = vec![
            ConversationMessage::user("Hi"),
            ConversationMessage::model("Hello! How can I help?"),
            ConversationMessage::user("Is there parking?"),
        ];

        let history = build_history_messages(&messages);
        let roles: Vec<ChatRole> = history.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::User, ChatRole::Assistant, ChatRole::User]
        );
        assert_eq!(
            history[1].content,
            vec![ChatContentBlock::Text {
                text: "Hello! How can I help?".to_string()
            }]
        );
    }

    #[test]
    fn test_tool_messages() {
        let call = build_tool_use_message("call_1", "get_quote", json!({"num_guests": 2}));
        assert_eq!(call.role, ChatRole::Assistant);

        let result = build_tool_result_message("call_1", "get_quote", json!({"total_price": 600}));
        assert_eq!(result.role, ChatRole::User);
        assert!(matches!(
            &result.content[0],
            ChatContentBlock::ToolResult { name, .. } if name == "get_quote"
        ));
    }
}
