use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use concierge_gateway::chat::{Orchestrator, PromptBuilder};
use concierge_gateway::providers::gemini::GeminiClient;
use concierge_gateway::server;
use concierge_gateway::state::AppState;
use concierge_gateway::tools::ToolManager;
use concierge_knowledge::KnowledgeIndex;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so the log level can come from settings
    let config = concierge_core::Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.settings.logging.level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Configuration loaded (model: {}, reference date: {})",
        config.model_id(),
        config.settings.assistant.reference_date
    );

    // A half-built index must never serve requests
    let knowledge = Arc::new(KnowledgeIndex::open(config.knowledge()).await?);
    info!(
        "Knowledge index ready: {} entries, dim {}, threshold {}",
        knowledge.len(),
        knowledge.dim(),
        knowledge.threshold()
    );

    let model_settings = &config.settings.model;
    let provider = GeminiClient::with_timeout(
        config.gemini_api_key(),
        &model_settings.model,
        Duration::from_secs(model_settings.timeout_seconds),
    )?
    .with_base_url(&model_settings.base_url)
    .with_max_output_tokens(model_settings.max_output_tokens)
    .with_dump_queries(config.settings.logging.dump_queries);
    info!("Gemini client created with model: {}", model_settings.model);

    let tools = Arc::new(ToolManager::new());
    info!("Registered {} tools", tools.get_tools().len());

    let orchestrator = Orchestrator::new(
        Arc::new(provider),
        knowledge,
        tools,
        PromptBuilder::new(&config.settings.assistant.reference_date),
    );
    let state = Arc::new(AppState::new(orchestrator));

    if config.settings.gateway.host != "127.0.0.1" && config.settings.gateway.host != "localhost" {
        tracing::warn!(
            "Gateway binding to non-localhost address: {}. The chat API has no authentication.",
            config.settings.gateway.host
        );
    }

    let bind_addr = config.bind_addr();
    info!("Starting concierge server on {}", bind_addr);

    server::run(state, &bind_addr, config.settings.gateway.static_dir.as_deref()).await
}
