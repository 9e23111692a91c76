//! API client errors

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by every `ApiClient` operation
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, broken body stream
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("{}", status_message(*.status, .detail.as_deref()))]
    Status {
        status: StatusCode,
        /// Message supplied by the server, if any
        detail: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

fn status_message(status: StatusCode, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{} ({})", detail, status.as_u16()),
        None => status.to_string(),
    }
}

impl ApiError {
    /// Build a status error from a response body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        Self::Status {
            status,
            detail: extract_detail(body),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Server-supplied message, verbatim
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Text for an alert: the server detail, else the reason phrase, else
    /// the error itself
    pub fn message(&self) -> String {
        match self {
            Self::Status { status, detail } => detail
                .clone()
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| status.as_u16().to_string()),
            other => other.to_string(),
        }
    }

    /// Server detail when there is one, `fallback` otherwise
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Pull a human readable message out of an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// (`{"detail": [{"msg": "..."}, ...]}`) and `{"message": "..."}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}
