//! Pure mapping from HTTP responses to payloads or domain errors.
//!
//! Kept free of reqwest types beyond `StatusCode` so the rules can be unit
//! tested without a network.

use reqwest::StatusCode;
use serde_json::Value;

use crate::domain::{Error, FieldViolation, join_violations};

/// Detail used when an error body is not JSON.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Split a completed response into its payload or an error.
///
/// `204 No Content` yields `Ok(None)`; any other success yields the body.
pub fn classify_response(status: StatusCode, body: Vec<u8>) -> Result<Option<Vec<u8>>, Error> {
    if !status.is_success() {
        return Err(map_error_response(status, &body));
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(None);
    }
    Ok(Some(body))
}

/// Map a non-2xx response into an [`Error`] with a human-readable message.
///
/// - 422 with a list `detail`: `"<loc.joined>: <msg>"` items joined by `"; "`.
/// - any truthy `detail`: the detail itself.
/// - otherwise: `"HTTP error! status: <code>"`.
///
/// A body that is not JSON behaves as if `detail` were `"Unknown error"`.
pub fn map_error_response(status: StatusCode, body: &[u8]) -> Error {
    let code = status.as_u16();
    let parsed = serde_json::from_slice::<Value>(body)
        .unwrap_or_else(|_| serde_json::json!({ "detail": UNKNOWN_ERROR }));
    let detail = parsed.get("detail").filter(|detail| is_truthy(detail));

    let message = match detail {
        Some(Value::Array(items)) if status == StatusCode::UNPROCESSABLE_ENTITY => {
            validation_message(items)
        }
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => format!("HTTP error! status: {code}"),
    };

    Error::from_status(code, message).with_details(parsed)
}

fn validation_message(items: &[Value]) -> String {
    let violations: Vec<FieldViolation> = items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).unwrap_or_else(|_| FieldViolation {
                loc: Vec::new(),
                msg: item.to_string(),
            })
        })
        .collect();
    join_violations(&violations)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Map reqwest transport failures into domain errors.
pub fn map_transport_error(error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::transport(format!("request timed out: {error}"))
    } else if error.is_decode() {
        Error::decode(error.to_string())
    } else {
        Error::transport(error.to_string())
    }
}

/// Short, single-line excerpt of a body for logs.
pub fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
