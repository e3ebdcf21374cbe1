//! Inbound request validation and normalization.

use serde::{Deserialize, Serialize};

use crate::error::{HashtagError, Result};

/// Count used when the caller omits it or asks for less than one.
pub const DEFAULT_COUNT: usize = 10;

/// Upper bound for the requested count; larger values are clamped.
pub const MAX_COUNT: usize = 30;

/// Built-in backend model identifier.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Body of `POST /hashtags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HashtagRequest {
    /// Source text to summarize. Required and non-blank.
    #[serde(default)]
    pub text: Option<String>,
    /// Requested number of hashtags.
    #[serde(default)]
    pub count: Option<i64>,
    /// Backend model override.
    #[serde(default)]
    pub model: Option<String>,
}

/// A request that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    /// Trimmed source text.
    pub text: String,
    /// Effective count, always in `1..=MAX_COUNT`.
    pub count: usize,
    /// Effective model identifier.
    pub model: String,
}

impl HashtagRequest {
    /// Create a request for `text` with no count or model override.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            count: None,
            model: None,
        }
    }

    /// Set the requested count
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the model override
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Validate the request, falling back to `default_model` when no model is given.
    ///
    /// Out-of-range counts are clamped, never rejected.
    pub fn validate(&self, default_model: &str) -> Result<ValidatedRequest> {
        let text = self
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HashtagError::InvalidInput("field 'text' is required".to_string()))?;

        let model = self
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default_model);

        Ok(ValidatedRequest {
            text: text.to_string(),
            count: effective_count(self.count),
            model: model.to_string(),
        })
    }
}

/// Map an optional requested count onto `1..=MAX_COUNT`.
pub fn effective_count(requested: Option<i64>) -> usize {
    match requested {
        None => DEFAULT_COUNT,
        Some(n) if n < 1 => DEFAULT_COUNT,
        Some(n) if n > MAX_COUNT as i64 => MAX_COUNT,
        Some(n) => n as usize,
    }
}
