//! Wire types for the generation backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling and resource options sent with every job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature. Zero keeps output deterministic.
    pub temperature: f32,
    /// Context window in tokens.
    pub num_ctx: u32,
    /// Maximum number of generated tokens.
    pub num_predict: u32,
    /// Layers offloaded to the GPU. Zero forces CPU execution.
    pub num_gpu: u32,
}

impl GenerationOptions {
    /// Deterministic CPU-only options with the given token bounds.
    pub fn deterministic(num_ctx: u32, num_predict: u32) -> Self {
        Self {
            temperature: 0.0,
            num_ctx,
            num_predict,
            num_gpu: 0,
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::deterministic(2048, 512)
    }
}

/// One request to the backend's generate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationJob {
    /// Model identifier.
    pub model: String,
    /// Instruction prompt including the source text.
    pub prompt: String,
    /// Structured-output constraint.
    #[serde(rename = "format")]
    pub output_schema: Value,
    /// Always `false`; the pipeline needs the whole document at once.
    pub stream: bool,
    /// Sampling options.
    pub options: GenerationOptions,
}

impl GenerationJob {
    /// Create a non-streaming job.
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        output_schema: Value,
        options: GenerationOptions,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            output_schema,
            stream: false,
            options,
        }
    }
}

/// Envelope returned by the backend's generate endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Model that served the job.
    #[serde(default)]
    pub model: Option<String>,
    /// Generated text; expected to hold a JSON document.
    #[serde(rename = "response", default)]
    pub raw_text: String,
    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_wire_format() {
        let job = GenerationJob::new(
            "llama3.2:3b",
            "prompt",
            json!({"type": "object"}),
            GenerationOptions::deterministic(1024, 256),
        );
        let wire = serde_json::to_value(&job).unwrap();

        assert_eq!(
            wire,
            json!({
                "model": "llama3.2:3b",
                "prompt": "prompt",
                "format": {"type": "object"},
                "stream": false,
                "options": {
                    "temperature": 0.0,
                    "num_ctx": 1024,
                    "num_predict": 256,
                    "num_gpu": 0
                }
            })
        );
    }

    #[test]
    fn test_result_from_envelope() {
        let envelope = r#"{"model":"llama3.2:3b","created_at":"2024-01-01T00:00:00Z","response":"{\"hashtags\":[]}","done":true}"#;
        let result: GenerationResult = serde_json::from_str(envelope).unwrap();
        assert_eq!(result.model.as_deref(), Some("llama3.2:3b"));
        assert_eq!(result.raw_text, r#"{"hashtags":[]}"#);
        assert!(result.done);
    }
}
