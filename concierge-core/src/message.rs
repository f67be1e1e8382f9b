use serde::{Deserialize, Serialize};

/// Author of a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The guest talking to the assistant
    User,
    /// The assistant's own earlier replies
    Model,
}

impl MessageRole {
    /// Map the frontend's `sender` field onto a role.
    ///
    /// Only the exact value `"user"` is a user turn; anything else is treated
    /// as one of the assistant's own replies.
    pub fn from_sender(sender: &str) -> Self {
        if sender == "user" {
            MessageRole::User
        } else {
            MessageRole::Model
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Model => write!(f, "model"),
        }
    }
}

/// One turn of the conversation history submitted with a chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub text: String,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Model,
            text: text.into(),
        }
    }
}

/// Message as sent by the web frontend: `{sender, text}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub sender: String,
    pub text: String,
}

impl From<WireMessage> for ConversationMessage {
    fn from(msg: WireMessage) -> Self {
        Self {
            role: MessageRole::from_sender(&msg.sender),
            text: msg.text,
        }
    }
}
