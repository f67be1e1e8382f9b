pub mod config;
pub mod message;

// Config re-exports
pub use config::{
    AssistantSettings, Config, ConfigError, GatewaySettings, KnowledgeSettings, LoggingSettings,
    ModelSettings, Secrets, SecretsError, Settings, SettingsError, load_dotenv,
};

// Message re-exports
pub use message::{ConversationMessage, MessageRole, WireMessage};
