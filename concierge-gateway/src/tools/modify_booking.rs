use serde::Deserialize;
use serde_json::{Value, json};

use super::args::{self, string_or_number};
use super::{Tool, ToolError};

#[derive(Debug, Deserialize)]
struct ModifyBookingInput {
    #[serde(deserialize_with = "string_or_number")]
    booking_id: String,
    new_start_date: Option<String>,
    new_end_date: Option<String>,
}

pub struct ModifyBookingTool;

#[async_trait::async_trait]
impl Tool for ModifyBookingTool {
    fn name(&self) -> &str {
        "modify_booking"
    }

    fn description(&self) -> &str {
        "Change the dates of an existing booking. Either date may be omitted to keep it unchanged."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "booking_id": {
                    "type": "string",
                    "description": "Identifier of the booking to modify."
                },
                "new_start_date": {
                    "type": "string",
                    "description": "New check-in date, YYYY-MM-DD."
                },
                "new_end_date": {
                    "type": "string",
                    "description": "New check-out date, YYYY-MM-DD."
                }
            },
            "required": ["booking_id"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> Result<Value, ToolError> {
        let input: ModifyBookingInput = args::parse(args)?;

        tracing::info!(
            booking_id = %input.booking_id,
            new_start_date = ?input.new_start_date,
            new_end_date = ?input.new_end_date,
            "modifying booking"
        );

        Ok(json!({
            "success": true,
            "booking_id": input.booking_id,
            "message": "Booking updated successfully.",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_modify_with_dates() {
        let result = ModifyBookingTool
            .execute(json!({
                "booking_id": "B-100",
                "new_start_date": "2025-10-01",
                "new_end_date": "2025-10-04"
            }))
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({
                "success": true,
                "booking_id": "B-100",
                "message": "Booking updated successfully."
            })
        );
    }

    #[tokio::test]
    async fn test_dates_are_optional() {
        let result = ModifyBookingTool
            .execute(json!({"booking_id": 555}))
            .await
            .unwrap();
        assert_eq!(result["booking_id"], "555");
    }

    #[tokio::test]
    async fn test_dates_are_passed_through_unchecked() {
        let result = ModifyBookingTool
            .execute(json!({
                "booking_id": "B-100",
                "new_start_date": "next friday",
                "new_end_date": "2025-10-01"
            }))
            .await
            .unwrap();
        assert_eq!(result["success"], true);
    }

    #[tokio::test]
    async fn test_missing_booking_id() {
        let err = ModifyBookingTool
            .execute(json!({"new_start_date": "2025-10-01"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
