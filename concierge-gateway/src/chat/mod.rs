pub mod history;
pub mod orchestrator;
pub mod prompt;

pub use history::{
    ChatContentBlock, ChatMessage, ChatRole, build_history_messages, build_tool_result_message,
    build_tool_use_message,
};
pub use orchestrator::{ChatError, ChatStep, FALLBACK_RESPONSE, Orchestrator};
pub use prompt::PromptBuilder;
