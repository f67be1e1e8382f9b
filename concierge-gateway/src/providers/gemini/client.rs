//! Google Gemini API client.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::history::ChatMessage;
use crate::providers::gemini::history::{GeminiContent, to_gemini_contents};
use crate::providers::provider::{
    Provider, ProviderContentBlock, ProviderError, ProviderResponse, ProviderUsage,
};
use crate::providers::query_dump::QueryDump;
use crate::tools::Tool;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    max_output_tokens: u32,
    dump_queries: bool,
}

/// Request body for the Gemini generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDeclaration>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Tool declaration for Gemini
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDeclaration {
    function_declarations: Vec<FunctionDeclaration>,
}

/// Function declaration
#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

/// Generation configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

/// Response from the generateContent API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

/// Candidate response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<CandidateContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Candidate content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
    #[serde(default)]
    pub role: String,
}

/// Candidate part
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidatePart {
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCallData,
    },
    Text {
        text: String,
    },
}

/// Function call data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCallData {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Usage metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::with_timeout(api_key, model, Duration::from_secs(120))
    }

    /// Create a new Gemini client with a per-request timeout
    pub fn with_timeout(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_output_tokens: 8192,
            dump_queries: false,
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Enable or disable debug query logging
    pub fn with_dump_queries(mut self, enabled: bool) -> Self {
        self.dump_queries = enabled;
        self
    }

    /// Send a conversation with full history and return the raw API response
    pub async fn generate_content(
        &self,
        history: Vec<ChatMessage>,
        tools: Vec<&dyn Tool>,
        new_message: Option<&str>,
    ) -> Result<GenerateContentResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let contents = to_gemini_contents(history, new_message);

        let tool_declarations = if tools.is_empty() {
            None
        } else {
            Some(vec![ToolDeclaration {
                function_declarations: tools
                    .iter()
                    .map(|tool| FunctionDeclaration {
                        name: tool.name().to_string(),
                        description: tool.description().to_string(),
                        parameters: sanitize_schema(tool.input_schema()),
                    })
                    .collect(),
            }])
        };

        let request_body = GenerateContentRequest {
            contents,
            tools: tool_declarations,
            generation_config: Some(GenerationConfig {
                max_output_tokens: Some(self.max_output_tokens),
            }),
        };

        let dump_handle = if self.dump_queries {
            let request_value: Value = serde_json::to_value(&request_body)?;
            QueryDump::request("gemini", &self.model, &request_value).await
        } else {
            None
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if let Some(handle) = dump_handle
            && let Ok(response_value) = serde_json::from_str::<Value>(&response_text)
        {
            handle.response(&response_value).await;
        }

        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: response_text,
            });
        }

        Ok(serde_json::from_str(&response_text)?)
    }
}

#[async_trait::async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send_conversation(
        &self,
        history: Vec<ChatMessage>,
        tools: Vec<&dyn Tool>,
        new_message: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError> {
        let response = self.generate_content(history, tools, new_message).await?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or(ProviderError::NoContent)?;

        let Some(candidate_content) = candidate.content else {
            return Err(ProviderError::InvalidFormat(format!(
                "candidate has no content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        };

        let content = candidate_content
            .parts
            .into_iter()
            .map(|part| match part {
                CandidatePart::Text { text } => ProviderContentBlock::Text { text },
                CandidatePart::FunctionCall { function_call } => ProviderContentBlock::ToolUse {
                    id: format!("call_{}", uuid::Uuid::new_v4()),
                    name: function_call.name,
                    input: if function_call.args.is_null() {
                        Value::Object(Default::default())
                    } else {
                        function_call.args
                    },
                },
            })
            .collect();

        let usage = response.usage_metadata.map(|u| ProviderUsage {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        Ok(ProviderResponse {
            id: uuid::Uuid::new_v4().to_string(),
            model: self.model.clone(),
            content,
            usage,
            stop_reason: candidate.finish_reason,
        })
    }
}

/// Recursively strip JSON Schema fields that Gemini's FunctionDeclaration
/// parameters do not support. Currently removes `additionalProperties` at
/// every nesting level.
fn sanitize_schema(mut schema: Value) -> Value {
    strip_unsupported_fields(&mut schema);
    schema
}

fn strip_unsupported_fields(value: &mut Value) {
    let Some(obj) = value.as_object_mut() else {
        return;
    };

    obj.remove("additionalProperties");

    for child in obj.values_mut() {
        strip_unsupported_fields(child);
    }
}
