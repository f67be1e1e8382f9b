//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use concierge_gateway::chat::{ChatMessage, Orchestrator, PromptBuilder};
use concierge_gateway::providers::{
    Provider, ProviderContentBlock, ProviderError, ProviderResponse,
};
use concierge_gateway::tools::{Tool, ToolError, ToolManager};
use concierge_knowledge::test_helpers::StaticEmbedder;
use concierge_knowledge::{KnowledgeEntry, KnowledgeIndex};
use serde_json::{Value, json};

pub const REFERENCE_DATE: &str = "2025-08-15";

pub const CHECK_IN_QUESTION: &str = "When can I check in?";
pub const MOON_QUESTION: &str = "Tell me about the moon";
pub const AVAILABILITY_QUESTION: &str =
    "Check availability for property 42 from 2025-09-01 to 2025-09-05";

/// One `send_conversation` call as seen by the provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub history: Vec<ChatMessage>,
    pub tool_names: Vec<String>,
    pub new_message: Option<String>,
}

/// Provider that replays queued replies and records every call.
///
/// Once the queue is exhausted further calls fail with `NoContent`.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<ProviderResponse, ProviderError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new(replies: Vec<Result<ProviderResponse, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn send_conversation(
        &self,
        history: Vec<ChatMessage>,
        tools: Vec<&dyn Tool>,
        new_message: Option<&str>,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            history,
            tool_names: tools.iter().map(|t| t.name().to_string()).collect(),
            new_message: new_message.map(str::to_string),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ProviderError::NoContent))
    }
}

pub fn reply(content: Vec<ProviderContentBlock>) -> Result<ProviderResponse, ProviderError> {
    Ok(ProviderResponse {
        id: "resp_test".to_string(),
        model: "scripted-model".to_string(),
        content,
        usage: None,
        stop_reason: Some("STOP".to_string()),
    })
}

pub fn text_reply(text: &str) -> Result<ProviderResponse, ProviderError> {
    reply(vec![ProviderContentBlock::Text {
        text: text.to_string(),
    }])
}

pub fn function_call(name: &str, args: Value) -> ProviderContentBlock {
    ProviderContentBlock::ToolUse {
        id: format!("call_{name}"),
        name: name.to_string(),
        input: args,
    }
}

pub fn call_reply(name: &str, args: Value) -> Result<ProviderResponse, ProviderError> {
    reply(vec![function_call(name, args)])
}

/// Tool that counts invocations and echoes its arguments.
pub struct CountingTool {
    name: String,
    calls: Arc<AtomicUsize>,
}

impl CountingTool {
    pub fn new(name: &str, calls: Arc<AtomicUsize>) -> Self {
        Self {
            name: name.to_string(),
            calls,
        }
    }
}

#[async_trait::async_trait]
impl Tool for CountingTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Counts how often it runs."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"echo": args}))
    }
}

/// Embedder with fixed 2-d vectors.
///
/// Distances to "What is check-in time?" at the origin: check-in query 0.4,
/// moon query 1.5. The availability request is far from every entry.
pub fn embedder() -> Arc<StaticEmbedder> {
    Arc::new(
        StaticEmbedder::new()
            .with("What is check-in time?", vec![0.0, 0.0])
            .with("Is there parking?", vec![3.0, 0.0])
            .with(CHECK_IN_QUESTION, vec![0.0, 0.632_455_5])
            .with(MOON_QUESTION, vec![1.224_745, 0.0])
            .with(AVAILABILITY_QUESTION, vec![10.0, 10.0]),
    )
}

pub async fn knowledge(embedder: Arc<StaticEmbedder>) -> Arc<KnowledgeIndex> {
    let entries = vec![
        KnowledgeEntry::new("What is check-in time?", "3 PM"),
        KnowledgeEntry::new("Is there parking?", "Yes, free parking on site"),
    ];
    Arc::new(
        KnowledgeIndex::from_entries(entries, embedder)
            .await
            .expect("knowledge index"),
    )
}

pub async fn orchestrator(provider: Arc<ScriptedProvider>, tools: ToolManager) -> Orchestrator {
    orchestrator_with(provider, tools, embedder()).await
}

pub async fn orchestrator_with(
    provider: Arc<ScriptedProvider>,
    tools: ToolManager,
    embedder: Arc<StaticEmbedder>,
) -> Orchestrator {
    Orchestrator::new(
        provider,
        knowledge(embedder).await,
        Arc::new(tools),
        PromptBuilder::new(REFERENCE_DATE),
    )
}
