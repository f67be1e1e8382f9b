use serde::Deserialize;
use serde_json::{Value, json};

use super::args::{self, string_or_number};
use super::{Tool, ToolError};

/// Nightly rate in USD used by the mock property backend.
pub const NIGHTLY_RATE: u64 = 300;

#[derive(Debug, Deserialize)]
struct CheckAvailabilityInput {
    #[serde(deserialize_with = "string_or_number")]
    property_id: String,
    start_date: String,
    end_date: String,
}

pub struct CheckAvailabilityTool;

#[async_trait::async_trait]
impl Tool for CheckAvailabilityTool {
    fn name(&self) -> &str {
        "check_availability"
    }

    fn description(&self) -> &str {
        "Check whether a property is available for the given dates and return its nightly price."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "property_id": {
                    "type": "string",
                    "description": "Identifier of the property."
                },
                "start_date": {
                    "type": "string",
                    "description": "Check-in date, YYYY-MM-DD."
                },
                "end_date": {
                    "type": "string",
                    "description": "Check-out date, YYYY-MM-DD."
                }
            },
            "required": ["property_id", "start_date", "end_date"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let input: CheckAvailabilityInput = args::parse(args)?;

        tracing::debug!(
            property_id = %input.property_id,
            start_date = %input.start_date,
            end_date = %input.end_date,
            "checking availability"
        );

        Ok(json!({
            "available": true,
            "price_per_night": NIGHTLY_RATE,
        }))
    }
}
