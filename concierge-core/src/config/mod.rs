//! Configuration management for concierge.
//!
//! Secrets come from environment variables, settings from a TOML file.
//!
//! ## Secrets (Environment Variables)
//! - `GEMINI_API_KEY` - Gemini API key (`GOOGLE_API_KEY` is accepted too)
//! - `MODEL_NAME` - optional, overrides `[model] model`
//!
//! ## Settings (TOML File)
//! Located at `~/.config/concierge/config.toml` (override with `CONCIERGE_CONFIG`):
//! ```toml
//! [model]
//! model = "gemini-2.0-flash"
//!
//! [gateway]
//! host = "127.0.0.1"
//! port = 5000
//!
//! [knowledge]
//! path = "knowledge_base.json"
//! ```

pub mod knowledge;
mod secrets;
mod settings;

use chrono::NaiveDate;

pub use knowledge::KnowledgeSettings;
pub use secrets::{Secrets, SecretsError};
pub use settings::{
    AssistantSettings, GatewaySettings, LoggingSettings, ModelSettings, Settings, SettingsError,
};

/// Combined configuration containing both secrets and settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secrets loaded from environment variables
    pub secrets: Secrets,
    /// Settings loaded from TOML configuration file
    pub settings: Settings,
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Secrets error: {0}")]
    Secrets(#[from] SecretsError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Reference date '{0}' is not a YYYY-MM-DD date")]
    InvalidReferenceDate(String),
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if no Gemini API key is set, the TOML file cannot
    /// be read or parsed, or the configured reference date is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let secrets = Secrets::from_env()?;
        let mut settings = Settings::load()?;
        apply_model_override(&mut settings, secrets::non_blank_var("MODEL_NAME"));
        Self::from_parts(secrets, settings)
    }

    /// Validate and combine already-loaded secrets and settings.
    pub fn from_parts(secrets: Secrets, settings: Settings) -> Result<Self, ConfigError> {
        if !is_iso_date(&settings.assistant.reference_date) {
            return Err(ConfigError::InvalidReferenceDate(
                settings.assistant.reference_date.clone(),
            ));
        }

        Ok(Self { secrets, settings })
    }

    /// Get the Gemini API key.
    pub fn gemini_api_key(&self) -> &str {
        &self.secrets.gemini_api_key
    }

    /// Get the configured chat model identifier.
    pub fn model_id(&self) -> &str {
        &self.settings.model.model
    }

    /// Get the HTTP bind address.
    pub fn bind_addr(&self) -> String {
        self.settings.bind_addr()
    }

    /// Get the knowledge index settings.
    pub fn knowledge(&self) -> &KnowledgeSettings {
        &self.settings.knowledge
    }
}

/// Load .env file if it exists (for development convenience).
pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn apply_model_override(settings: &mut Settings, model: Option<String>) {
    if let Some(model) = model {
        tracing::info!("MODEL_NAME overrides configured model with {}", model);
        settings.model.model = model;
    }
}

fn is_iso_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secrets() -> Secrets {
        Secrets {
            gemini_api_key: "gm-test".to_string(),
        }
    }

    #[test]
    fn test_from_parts_accepts_defaults() {
        let config = Config::from_parts(secrets(), Settings::default()).unwrap();

        assert_eq!(config.gemini_api_key(), "gm-test");
        assert_eq!(config.model_id(), "gemini-2.0-flash");
        assert_eq!(config.bind_addr(), "127.0.0.1:5000");
        assert_eq!(config.knowledge().relevance_threshold, 1.0);
    }

    #[test]
    fn test_invalid_reference_date() {
        let mut settings = Settings::default();
        settings.assistant.reference_date = "August 15th".to_string();

        let err = Config::from_parts(secrets(), settings).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReferenceDate(_)));

        for impossible in ["2025-13-45", "2025-02-30", "2025-00-10"] {
            let mut settings = Settings::default();
            settings.assistant.reference_date = impossible.to_string();

            let err = Config::from_parts(secrets(), settings).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidReferenceDate(ref date) if date == impossible),
                "{impossible} should be rejected"
            );
        }
    }

    #[test]
    fn test_model_name_override() {
        let mut settings = Settings::default();
        apply_model_override(&mut settings, None);
        assert_eq!(settings.model.model, "gemini-2.0-flash");

        apply_model_override(&mut settings, Some("gemini-1.5-pro".to_string()));
        let config = Config::from_parts(secrets(), settings).unwrap();
        assert_eq!(config.model_id(), "gemini-1.5-pro");
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2025-08-15"));
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2025-02-29"));
        assert!(!is_iso_date("2025/08/15"));
        assert!(!is_iso_date("20a5-08-15"));
    }
}
