//! Argument parsing shared by the booking tools.
//!
//! Models send numbers where ids are expected and whole numbers as floats
//! (`2.0`), so the helpers here accept both shapes.

use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::ToolError;

/// Deserialize tool arguments, treating a missing argument object as `{}`.
pub fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ToolError::InvalidArguments(format!("{field} must be a YYYY-MM-DD date, got {value:?}"))
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accept an identifier given as a string or a whole number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Text(text) if !text.trim().is_empty() => Ok(text),
        RawId::Text(_) => Err(de::Error::custom("identifier must not be empty")),
        RawId::Integer(n) => Ok(n.to_string()),
        RawId::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(format!("{}", f as i64)),
        RawId::Float(f) => Err(de::Error::custom(format!("invalid identifier {f}"))),
    }
}

/// Accept a count given as an integer or a whole float.
pub fn whole_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!(
            "expected a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}
