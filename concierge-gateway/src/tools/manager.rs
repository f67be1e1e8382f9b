use std::collections::HashMap;

use serde_json::Value;

use super::{
    Tool, ToolError, check_availability::CheckAvailabilityTool, get_quote::GetQuoteTool,
    modify_booking::ModifyBookingTool, send_message_to_host::SendMessageToHostTool,
};

/// Central registry for all booking tools
///
/// Owns every tool instance and dispatches by name. Built once at startup and
/// shared read-only across requests.
pub struct ToolManager {
    tools: Vec<Box<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolManager {
    /// Create a new ToolManager with all booking tools registered
    pub fn new() -> Self {
        Self::with_tools(vec![
            Box::new(CheckAvailabilityTool),
            Box::new(GetQuoteTool),
            Box::new(ModifyBookingTool),
            Box::new(SendMessageToHostTool),
        ])
    }

    /// Create a manager from an explicit tool list.
    ///
    /// A later tool replaces an earlier one with the same name.
    pub fn with_tools(tools: Vec<Box<dyn Tool>>) -> Self {
        let mut by_name = HashMap::with_capacity(tools.len());
        for (position, tool) in tools.iter().enumerate() {
            by_name.insert(tool.name().to_string(), position);
        }
        Self { tools, by_name }
    }

    /// Get all tools as references for use with the provider API
    pub fn get_tools(&self) -> Vec<&dyn Tool> {
        let mut positions: Vec<usize> = self.by_name.values().copied().collect();
        positions.sort_unstable();
        positions
            .into_iter()
            .map(|position| self.tools[position].as_ref())
            .collect()
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.by_name
            .get(name)
            .map(|&position| self.tools[position].as_ref())
    }

    /// Execute a tool by name with the given JSON arguments
    pub async fn execute(&self, name: &str, input: Value) -> Result<Value, ToolError> {
        match self.get(name) {
            Some(tool) => tool.execute(input).await,
            None => Err(ToolError::Unknown(name.to_string())),
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_manager_new() {
        let manager = ToolManager::new();
        let tool_names: Vec<&str> = manager.get_tools().iter().map(|t| t.name()).collect();
        assert_eq!(
            tool_names,
            vec![
                "check_availability",
                "get_quote",
                "modify_booking",
                "send_message_to_host"
            ]
        );
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        let manager = ToolManager::new();
        for tool in manager.get_tools() {
            let schema = tool.input_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(schema["required"].as_array().is_some(), "{}", tool.name());
        }
    }

    #[tokio::test]
    async fn test_tool_manager_execute() {
        let manager = ToolManager::new();
        let result = manager
            .execute("send_message_to_host", json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(result["success"], true);
    }

    #[tokio::test]
    async fn test_tool_manager_execute_unknown() {
        let manager = ToolManager::new();
        let result = manager.execute("cancel_booking", json!({})).await;
        assert!(matches!(result, Err(ToolError::Unknown(name)) if name == "cancel_booking"));
        assert!(manager.get("cancel_booking").is_none());
    }
}
