pub mod chat;
pub mod providers;
pub mod server;
pub mod state;
pub mod tools;

pub use chat::{ChatError, FALLBACK_RESPONSE, Orchestrator};
pub use providers::provider::{
    Provider, ProviderContentBlock, ProviderError, ProviderResponse, ProviderUsage,
    extract_all_text, extract_tool_uses, has_tool_uses,
};
pub use state::AppState;
