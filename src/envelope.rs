//! Unwrapping of the `{ Response, ErrorCode, ErrorStatus, Message }` envelope
//! every Bungie endpoint returns.

use serde_json::Value;

use crate::error::{ApiError, ErrorDetails};

pub const SUCCESS_CODE: i64 = 1;

/// Returns the inner `Response` payload, or the whole envelope when the
/// endpoint signals success without one.
pub fn interpret(envelope: Value) -> Result<Value, ApiError> {
    if !is_success(&envelope) {
        return Err(ApiError::generic(failure_details(envelope)));
    }

    match envelope {
        Value::Object(mut fields) if fields.contains_key("Response") => {
            Ok(fields.remove("Response").unwrap_or(Value::Null))
        }
        envelope => Ok(envelope),
    }
}

fn is_success(envelope: &Value) -> bool {
    let has_response = envelope.get("Response").is_some_and(is_truthy);
    has_response || error_code(envelope) == Some(SUCCESS_CODE)
}

// integral floats such as `5.0` count as codes too
fn error_code(envelope: &Value) -> Option<i64> {
    let code = envelope.get("ErrorCode")?;
    code.as_i64().or_else(|| {
        code.as_f64()
            .filter(|c| c.fract() == 0.0 && c.abs() <= i64::MAX as f64)
            .map(|c| c as i64)
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn failure_details(envelope: Value) -> ErrorDetails {
    let status = text_field(&envelope, "ErrorStatus").unwrap_or_else(|| "Unknown Error".into());
    let message =
        text_field(&envelope, "Message").unwrap_or_else(|| "No error message provided".into());
    let code = error_code(&envelope).unwrap_or(0);

    ErrorDetails::new(format!("{status}: {message}"))
        .with_code(code)
        .with_response(envelope)
}

fn text_field(envelope: &Value, key: &str) -> Option<String> {
    match envelope.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
