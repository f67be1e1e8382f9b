//! Settings configuration loaded from TOML files.
//!
//! Non-sensitive configuration lives in `~/.config/concierge/config.toml`
//! (or the file named by `CONCIERGE_CONFIG`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::knowledge::KnowledgeSettings;

/// Default TOML configuration file content
const DEFAULT_CONFIG_TOML: &str = r#"# concierge configuration file
# Located at: ~/.config/concierge/config.toml
#
# Secrets are loaded from environment variables:
#   - GEMINI_API_KEY

[model]
model = "gemini-2.0-flash"
base_url = "https://generativelanguage.googleapis.com/v1beta"
timeout_seconds = 120
max_output_tokens = 8192

[gateway]
host = "127.0.0.1"
port = 5000
# static_dir = "frontend/build"

[knowledge]
path = "knowledge_base.json"
embedding_url = "http://127.0.0.1:11434"
embedding_model = "paraphrase-multilingual"
relevance_threshold = 1.0
timeout_seconds = 30

[assistant]
reference_date = "2025-08-15"

[logging]
level = "info"
# dump_queries = true
"#;

/// Settings loaded from TOML configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    /// Chat model configuration
    #[serde(default)]
    pub model: ModelSettings,

    /// Gateway server configuration
    #[serde(default)]
    pub gateway: GatewaySettings,

    /// Knowledge index configuration
    #[serde(default)]
    pub knowledge: KnowledgeSettings,

    /// Prompt configuration
    #[serde(default)]
    pub assistant: AssistantSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Chat model settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelSettings {
    /// Gemini model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generateContent API
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// Per-request timeout for model calls
    #[serde(default = "default_model_timeout_seconds")]
    pub timeout_seconds: u64,

    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Gateway server settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySettings {
    /// Host to bind to
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Directory with the built frontend, served at `/` when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

/// Assistant prompt settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantSettings {
    /// Date the assistant treats as "today" in its instructions
    #[serde(default = "default_reference_date")]
    pub reference_date: String,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Dump raw LLM request/response JSON to ./logs/queries/
    #[serde(default)]
    pub dump_queries: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_model_base_url(),
            timeout_seconds: default_model_timeout_seconds(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
            static_dir: None,
        }
    }
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            reference_date: default_reference_date(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dump_queries: false,
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model_timeout_seconds() -> u64 {
    120
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    5000
}

fn default_reference_date() -> String {
    "2025-08-15".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config directory not found")]
    ConfigDirNotFound,
}

impl Settings {
    /// Load settings from the TOML configuration file.
    ///
    /// If the config file doesn't exist, creates it with default values.
    pub fn load() -> Result<Self, SettingsError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("Creating default configuration at {:?}", config_path);
            Self::create_default_config(&config_path)?;
        }

        Self::load_from_path(&config_path)
    }

    /// Load settings from an explicit file path.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse settings from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings)
    }

    /// Get the configuration file path.
    ///
    /// `CONCIERGE_CONFIG` wins; otherwise the XDG config directory is used.
    pub fn config_path() -> Result<PathBuf, SettingsError> {
        if let Ok(path) = std::env::var("CONCIERGE_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or(SettingsError::ConfigDirNotFound)?
            .join("concierge");

        Ok(config_dir.join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, DEFAULT_CONFIG_TOML)?;

        Ok(())
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.gateway.host, self.gateway.port)
    }
}
