use serde::Deserialize;
use serde_json::{Value, json};

use super::args;
use super::{Tool, ToolError};

#[derive(Debug, Deserialize)]
struct SendMessageInput {
    message: String,
}

pub struct SendMessageToHostTool;

#[async_trait::async_trait]
impl Tool for SendMessageToHostTool {
    fn name(&self) -> &str {
        "send_message_to_host"
    }

    fn description(&self) -> &str {
        "Forward a message from the guest to the property host."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "The message to deliver to the host."
                }
            },
            "required": ["message"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let input: SendMessageInput = args::parse(args)?;

        tracing::info!(message = %input.message, "Message to host");

        Ok(json!({
            "success": true,
            "message": "Message sent to host.",
        }))
    }
}
