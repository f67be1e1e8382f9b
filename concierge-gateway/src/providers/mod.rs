pub mod gemini;
pub mod provider;
pub mod query_dump;

pub use provider::{Provider, ProviderContentBlock, ProviderError, ProviderResponse, ProviderUsage};
