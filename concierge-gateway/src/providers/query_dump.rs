//! Raw request/response dumps for model calls.
//!
//! Enabled with `dump_queries = true` under `[logging]`. Each model call writes
//! `{timestamp}-{provider}-{model}.request.json` and a matching
//! `.response.json` under `./logs/queries`. Write failures only warn.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

pub const QUERY_DIR: &str = "./logs/queries";

/// Pairs the request dump with its response dump.
#[derive(Debug)]
pub struct QueryDump {
    base: PathBuf,
}

impl QueryDump {
    /// Dump `value` as the request of a new exchange under [`QUERY_DIR`].
    pub async fn request(provider: &str, model: &str, value: &Value) -> Option<Self> {
        Self::request_in(Path::new(QUERY_DIR), provider, model, value).await
    }

    pub async fn request_in(
        dir: &Path,
        provider: &str,
        model: &str,
        value: &Value,
    ) -> Option<Self> {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!(dir = %dir.display(), error = %e, "query dump directory not writable");
            return None;
        }

        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let base = dir.join(format!(
            "{}-{}-{}",
            timestamp,
            provider,
            file_safe(model)
        ));

        write_json(&suffixed(&base, "request"), value).await;
        Some(Self { base })
    }

    /// Dump `value` as the response paired with the earlier request.
    pub async fn response(&self, value: &Value) {
        write_json(&suffixed(&self.base, "response"), value).await;
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

fn suffixed(base: &Path, phase: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{phase}.json"));
    PathBuf::from(name)
}

fn file_safe(model: &str) -> String {
    model
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn write_json(path: &Path, value: &Value) {
    let body = match serde_json::to_string_pretty(value) {
        Ok(body) => body,
        Err(e) => {
            warn!(error = %e, "query dump serialization failed");
            return;
        }
    };
    if let Err(e) = tokio::fs::write(path, body).await {
        warn!(path = %path.display(), error = %e, "query dump write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_safe_model_names() {
        assert_eq!(file_safe("gemini-2.0-flash"), "gemini-2.0-flash");
        assert_eq!(file_safe("models/gemini:pro"), "models_gemini_pro");
    }

    #[tokio::test]
    async fn test_request_and_response_share_base_name() {
        let dir = tempfile::tempdir().unwrap();

        let dump = QueryDump::request_in(dir.path(), "gemini", "gemini-2.0-flash", &json!({"q": 1}))
            .await
            .unwrap();
        dump.response(&json!({"a": 2})).await;

        let request = suffixed(dump.base(), "request");
        let response = suffixed(dump.base(), "response");
        assert!(request.to_string_lossy().ends_with("-gemini-gemini-2.0-flash.request.json"));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&response).unwrap()).unwrap();
        assert_eq!(written, json!({"a": 2}));
        assert!(request.exists());
    }
}
