//! Hashtag service error types.
//!
//! Every pipeline stage short-circuits with exactly one of the five terminal
//! failure kinds below. None of them is fatal to the process: each failure is
//! scoped to one request and reported to its caller.
//!
//! | Variant                 | Cause                                   | HTTP |
//! |-------------------------|-----------------------------------------|------|
//! | `InvalidInput`          | caller sent a blank or unreadable body  | 400  |
//! | `Upstream`              | backend non-2xx or transport failure    | 502  |
//! | `EmptyUpstreamResponse` | backend envelope empty or unparsable    | 502  |
//! | `MalformedModelOutput`  | generated text is not `{"hashtags":[]}` | 502  |
//! | `IncompleteResult`      | too few candidates survived sanitizing  | 502  |

use axum::http::StatusCode;
use thiserror::Error;

/// Hashtag service errors.
#[derive(Error, Debug)]
pub enum HashtagError {
    /// Request rejected before any backend call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend answered with a non-success status, or could not be reached.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Backend answered 2xx but the envelope carried nothing usable.
    #[error("Empty upstream response: {0}")]
    EmptyUpstreamResponse(String),

    /// The generated text could not be read as a hashtag document.
    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    /// Fewer valid hashtags than requested survived sanitization.
    #[error("Incomplete result: expected {expected} hashtags, got {}", got.len())]
    IncompleteResult {
        /// Requested count.
        expected: usize,
        /// Hashtags salvaged so far, in acceptance order.
        got: Vec<String>,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for hashtag operations
pub type Result<T> = std::result::Result<T, HashtagError>;

impl HashtagError {
    /// HTTP status the failure is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HashtagError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            HashtagError::Upstream(_)
            | HashtagError::EmptyUpstreamResponse(_)
            | HashtagError::MalformedModelOutput(_)
            | HashtagError::IncompleteResult { .. } => StatusCode::BAD_GATEWAY,
            HashtagError::Config(_) | HashtagError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// JSON error body: `{"error": msg}`, plus `"got"` for incomplete results.
    pub fn to_body(&self) -> serde_json::Value {
        match self {
            HashtagError::IncompleteResult { got, .. } => serde_json::json!({
                "error": self.to_string(),
                "got": got,
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        }
    }

    /// Short machine-readable name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HashtagError::InvalidInput(_) => "invalid_input",
            HashtagError::Upstream(_) => "upstream_error",
            HashtagError::EmptyUpstreamResponse(_) => "empty_upstream_response",
            HashtagError::MalformedModelOutput(_) => "malformed_model_output",
            HashtagError::IncompleteResult { .. } => "incomplete_result",
            HashtagError::Config(_) => "config",
            HashtagError::Server(_) => "server",
        }
    }
}

impl From<reqwest::Error> for HashtagError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HashtagError::Upstream(format!("backend request timed out: {err}"))
        } else {
            HashtagError::Upstream(format!("backend request failed: {err}"))
        }
    }
}

impl From<toml::de::Error> for HashtagError {
    fn from(err: toml::de::Error) -> Self {
        HashtagError::Config(format!("Failed to parse config: {err}"))
    }
}
