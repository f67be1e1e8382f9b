pub mod client;
pub mod history;

pub use client::GeminiClient;
