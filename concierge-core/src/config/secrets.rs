//! Secrets configuration loaded from environment variables only.
//!
//! API keys never live in the TOML settings file. They are read from the
//! process environment, with `.env` loaded first as a development convenience.

use std::env;

/// Secrets loaded exclusively from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Gemini API key (env: GEMINI_API_KEY, falling back to GOOGLE_API_KEY)
    pub gemini_api_key: String,
}

/// Errors that can occur when loading secrets
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
    #[error("Missing required secret: {0}")]
    MissingSecret(String),
}

impl Secrets {
    /// Load secrets from environment variables.
    ///
    /// This function also loads .env file if present (for development),
    /// but production should rely on actual environment variables.
    pub fn from_env() -> Result<Self, SecretsError> {
        let _ = dotenvy::dotenv();

        Self::from_env_inner()
    }

    /// Internal method to load from environment without loading .env
    pub(crate) fn from_env_inner() -> Result<Self, SecretsError> {
        let gemini_api_key = ["GEMINI_API_KEY", "GOOGLE_API_KEY"]
            .into_iter()
            .find_map(non_blank_var)
            .ok_or_else(|| SecretsError::MissingSecret("GEMINI_API_KEY".to_string()))?;

        Ok(Self { gemini_api_key })
    }
}

/// Read an environment variable, treating blank values as unset.
pub(crate) fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests that touch the process environment must not interleave.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_secrets_from_env() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { env::set_var("GEMINI_API_KEY", "gm-test") }

        let secrets = Secrets::from_env_inner().unwrap();
        assert_eq!(secrets.gemini_api_key, "gm-test");
    }

    #[test]
    fn test_google_api_key_fallback() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("GEMINI_API_KEY");
            env::set_var("GOOGLE_API_KEY", "google-test");
        }

        let secrets = Secrets::from_env_inner().unwrap();
        assert_eq!(secrets.gemini_api_key, "google-test");

        unsafe { env::set_var("GEMINI_API_KEY", "gm-test") }
        let secrets = Secrets::from_env_inner().unwrap();
        assert_eq!(secrets.gemini_api_key, "gm-test");

        unsafe {
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("GOOGLE_API_KEY");
        }
    }

    #[test]
    fn test_missing_key_error() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::remove_var("GEMINI_API_KEY");
            env::remove_var("GOOGLE_API_KEY");
        }

        let err = Secrets::from_env_inner().unwrap_err();
        assert!(matches!(err, SecretsError::MissingSecret(_)));
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            env::set_var("GEMINI_API_KEY", "   ");
            env::remove_var("GOOGLE_API_KEY");
        }

        assert!(Secrets::from_env_inner().is_err());
    }
}
