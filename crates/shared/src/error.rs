use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Used when a request never produced an HTTP response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error: unable to reach the server";
/// Used when a successful response body could not be decoded.
pub const DECODE_ERROR_MESSAGE: &str = "Unexpected response from server";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Transport,
    Http,
    Decode,
}

/// The client's single error shape, whatever the backend or transport reported.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ApiError {
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: NETWORK_ERROR_MESSAGE.to_string(),
            details: Some(Value::String(cause.to_string())),
            status: None,
        }
    }

    pub fn decode(status: u16, cause: impl std::fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Decode,
            message: DECODE_ERROR_MESSAGE.to_string(),
            details: Some(Value::String(cause.to_string())),
            status: Some(status),
        }
    }

    /// Normalizes a non-2xx response. `body` is the raw response text, which may
    /// or may not be JSON.
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed = serde_json::from_str::<Value>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(structured_message)
            .unwrap_or_else(|| format!("Request failed with status code {status}"));
        let details = parsed.as_ref().and_then(|value| {
            value
                .get("details")
                .or_else(|| value.get("detail"))
                .filter(|v| !v.is_null())
                .cloned()
        });

        Self {
            kind: ErrorKind::Http,
            message,
            details,
            status: Some(status),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// The backend's message when one was supplied, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self.kind {
            ErrorKind::Http if self.message.starts_with("Request failed with status code") => {
                fallback.to_string()
            }
            _ if self.message.trim().is_empty() => fallback.to_string(),
            _ => self.message.clone(),
        }
    }
}

// `detail` is what FastAPI emits; validation failures carry a list of `{msg}`.
fn structured_message(body: &Value) -> Option<String> {
    ["detail", "error", "message"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(message_text)
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(_) => item.get("msg").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        Value::Object(_) => value
            .get("message")
            .or_else(|| value.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
