pub mod args;
pub mod check_availability;
pub mod get_quote;
pub mod manager;
pub mod modify_booking;
pub mod send_message_to_host;

pub use manager::ToolManager;

use serde_json::Value;

/// Errors returned by tool execution
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Trait that all tools must implement
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Name of the tool (must match regex `^[a-zA-Z0-9_-]{1,64}$`)
    fn name(&self) -> &str;

    /// Description of what the tool does
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input
    fn input_schema(&self) -> Value;

    /// Execute the tool with the given arguments, returning a JSON result
    /// that is forwarded verbatim to the model.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}
