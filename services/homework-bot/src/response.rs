//! Shape checks for the homework status API payload

use serde_json::Value;

use crate::BotError;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validate a decoded payload and return its `homeworks` records.
///
/// An empty slice is a normal outcome: nothing changed in the polled window.
/// `current_date` is optional, but when present it has to be an integer since
/// it becomes the next poll cursor.
pub fn check_response(payload: &Value) -> crate::Result<&[Value]> {
    let map = payload.as_object().ok_or_else(|| {
        BotError::UnexpectedType(format!(
            "API response is {}, expected an object",
            json_type_name(payload)
        ))
    })?;

    let homeworks = map
        .get(HOMEWORKS_KEY)
        .ok_or_else(|| BotError::MissingKey(HOMEWORKS_KEY.to_string()))?;

    let records = homeworks.as_array().ok_or_else(|| {
        BotError::UnexpectedType(format!(
            "'{}' is {}, expected an array",
            HOMEWORKS_KEY,
            json_type_name(homeworks)
        ))
    })?;

    if let Some(date) = map.get(CURRENT_DATE_KEY) {
        if date.as_i64().is_none() {
            return Err(BotError::UnexpectedType(format!(
                "'{}' is {}, expected an integer",
                CURRENT_DATE_KEY,
                json_type_name(date)
            )));
        }
    }

    Ok(records.as_slice())
}

/// Forward cursor carried by the response, if any
pub fn current_date(payload: &Value) -> Option<i64> {
    payload.get(CURRENT_DATE_KEY).and_then(Value::as_i64)
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
