//! One chat request: retrieval, first model turn, optional tool call, final turn.

use std::fmt;
use std::sync::Arc;

use concierge_core::{ConversationMessage, MessageRole};
use concierge_knowledge::{KnowledgeError, KnowledgeIndex};
use tracing::{debug, error, info, warn};

use crate::chat::history::{
    ChatMessage, ChatRole, build_history_messages, build_tool_result_message,
    build_tool_use_message,
};
use crate::chat::prompt::PromptBuilder;
use crate::providers::provider::{
    Provider, ProviderError, ProviderResponse, extract_all_text, extract_tool_uses,
    has_tool_uses,
};
use crate::tools::{ToolError, ToolManager};

/// Text returned to the user whenever a request fails past validation.
pub const FALLBACK_RESPONSE: &str = "Sorry, I'm having trouble connecting to the AI service.";

/// Number of knowledge entries injected per request.
const CONTEXT_ENTRIES: usize = 1;

/// Stage of a request, reported when it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatStep {
    Retrieval,
    FirstModelTurn,
    ToolDispatch,
    SecondModelTurn,
}

impl fmt::Display for ChatStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChatStep::Retrieval => "retrieval",
            ChatStep::FirstModelTurn => "first_model_turn",
            ChatStep::ToolDispatch => "tool_dispatch",
            ChatStep::SecondModelTurn => "second_model_turn",
        })
    }
}

/// Errors that can occur while answering a chat request
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Knowledge retrieval failed: {0}")]
    Retrieval(#[from] KnowledgeError),

    #[error("Model provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Model requested unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{name}' failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: ToolError,
    },
}

impl ChatError {
    /// Short machine-readable label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::InvalidRequest(_) => "invalid_request",
            ChatError::Retrieval(_) => "retrieval",
            ChatError::Provider(e) if e.is_unavailable() => "model_unavailable",
            ChatError::Provider(_) => "model_protocol",
            ChatError::UnknownTool(_) => "unknown_tool",
            ChatError::Tool { .. } => "tool",
        }
    }
}

/// A failure together with the step that produced it.
#[derive(Debug)]
pub struct StepFailure {
    pub step: ChatStep,
    pub error: ChatError,
}

trait AtStep<T> {
    fn at(self, step: ChatStep) -> Result<T, StepFailure>;
}

impl<T, E: Into<ChatError>> AtStep<T> for Result<T, E> {
    fn at(self, step: ChatStep) -> Result<T, StepFailure> {
        self.map_err(|e| StepFailure {
            step,
            error: e.into(),
        })
    }
}

/// Answers chat requests against the knowledge index, model and tools.
///
/// Holds only shared read-only state, so one instance serves every request.
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    knowledge: Arc<KnowledgeIndex>,
    tools: Arc<ToolManager>,
    prompt: PromptBuilder,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        knowledge: Arc<KnowledgeIndex>,
        tools: Arc<ToolManager>,
        prompt: PromptBuilder,
    ) -> Self {
        Self {
            provider,
            knowledge,
            tools,
            prompt,
        }
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }

    pub fn knowledge(&self) -> &KnowledgeIndex {
        &self.knowledge
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    /// Produce the assistant's reply to `history`.
    ///
    /// Fails only with [`ChatError::InvalidRequest`]. Every later failure is
    /// logged and answered with [`FALLBACK_RESPONSE`].
    pub async fn respond(&self, history: &[ConversationMessage]) -> Result<String, ChatError> {
        let (prior, last) = split_history(history)?;

        match self.answer(prior, last).await {
            Ok(text) => Ok(text),
            Err(StepFailure { step, error }) => {
                error!(
                    step = %step,
                    kind = error.kind(),
                    error = %error,
                    "chat request failed, returning fallback response"
                );
                Ok(FALLBACK_RESPONSE.to_string())
            }
        }
    }

    async fn answer(
        &self,
        prior: &[ConversationMessage],
        last: &ConversationMessage,
    ) -> Result<String, StepFailure> {
        let context = self
            .knowledge
            .search(&last.text, CONTEXT_ENTRIES)
            .await
            .at(ChatStep::Retrieval)?;
        debug!(
            context_entries = context.as_ref().map_or(0, Vec::len),
            "knowledge retrieval done"
        );

        let augmented = self.prompt.augment(&last.text, context.as_deref());
        let history = build_history_messages(prior);
        let tools = self.tools.get_tools();

        let first = self
            .provider
            .send_conversation(history.clone(), tools.clone(), Some(&augmented))
            .await
            .at(ChatStep::FirstModelTurn)?;
        self.log_turn(ChatStep::FirstModelTurn, &first);

        let mut calls = extract_tool_uses(&first).into_iter();
        let Some((call_id, name, args)) = calls.next() else {
            return final_text(&first).at(ChatStep::FirstModelTurn);
        };
        let ignored = calls.count();
        if ignored > 0 {
            warn!(
                tool = %name,
                ignored,
                "model requested several tools, dispatching only the first"
            );
        }

        info!(tool = %name, call_id = %call_id, "dispatching tool call");
        let result = self
            .tools
            .execute(&name, args.clone())
            .await
            .map_err(|source| match source {
                ToolError::Unknown(unknown) => ChatError::UnknownTool(unknown),
                source => ChatError::Tool {
                    name: name.clone(),
                    source,
                },
            })
            .at(ChatStep::ToolDispatch)?;

        let mut follow_up = history;
        follow_up.push(ChatMessage::text(ChatRole::User, augmented));
        follow_up.push(build_tool_use_message(&call_id, &name, args));
        follow_up.push(build_tool_result_message(&call_id, &name, result));

        let second = self
            .provider
            .send_conversation(follow_up, tools, None)
            .await
            .at(ChatStep::SecondModelTurn)?;
        self.log_turn(ChatStep::SecondModelTurn, &second);

        if has_tool_uses(&second) {
            warn!("model requested another tool after the tool result, not dispatching it");
        }
        final_text(&second).at(ChatStep::SecondModelTurn)
    }

    fn log_turn(&self, step: ChatStep, response: &ProviderResponse) {
        let (input_tokens, output_tokens) = response
            .usage
            .as_ref()
            .map_or((0, 0), |u| (u.input_tokens, u.output_tokens));
        debug!(
            provider = self.provider.name(),
            step = %step,
            response_id = %response.id,
            input_tokens,
            output_tokens,
            "model turn completed"
        );
    }
}

/// Split into prior turns and the final user turn.
fn split_history(
    history: &[ConversationMessage],
) -> Result<(&[ConversationMessage], &ConversationMessage), ChatError> {
    let Some((last, prior)) = history.split_last() else {
        return Err(ChatError::InvalidRequest(
            "conversation history is empty".to_string(),
        ));
    };
    if last.role != MessageRole::User {
        return Err(ChatError::InvalidRequest(
            "last message must come from the user".to_string(),
        ));
    }
    Ok((prior, last))
}

fn final_text(response: &ProviderResponse) -> Result<String, ProviderError> {
    let text = extract_all_text(response);
    if text.is_empty() {
        return Err(ProviderError::NoContent);
    }
    Ok(text)
}
