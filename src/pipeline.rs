//! The hashtag generation pipeline.
//!
//! ```text
//! validate ──> prompt + schema ──> generate ──> parse ──> sanitize ──> assemble
//!    │                                │           │                      │
//!    └─ InvalidInput        Upstream / EmptyUpstreamResponse             └─ IncompleteResult
//!                                     MalformedModelOutput
//! ```
//!
//! Every stage may end the run; nothing is retried and no state is shared
//! between runs apart from the immutable generator.

use std::sync::Arc;

use serde::Serialize;
use tracing::field::Empty;

use crate::backend::{GenerationJob, GenerationOptions, Generator, OllamaClient};
use crate::config::BackendConfig;
use crate::error::{HashtagError, Result};
use crate::parser::parse_candidates;
use crate::prompt::build_prompt;
use crate::request::{HashtagRequest, ValidatedRequest};
use crate::sanitizer::sanitize;
use crate::schema::build_schema;

/// Successful pipeline result. Holds exactly `count` hashtags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashtagResponse {
    model: String,
    count: usize,
    hashtags: Vec<String>,
}

impl HashtagResponse {
    /// Model that generated the hashtags
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of hashtags
    pub fn count(&self) -> usize {
        self.count
    }

    /// Validated hashtags, in acceptance order
    pub fn hashtags(&self) -> &[String] {
        &self.hashtags
    }
}

/// Turn a sanitized set into a response, refusing partial sets.
///
/// A short set becomes [`HashtagError::IncompleteResult`] carrying what was
/// salvaged.
pub fn assemble(model: String, count: usize, hashtags: Vec<String>) -> Result<HashtagResponse> {
    if hashtags.len() != count {
        return Err(HashtagError::IncompleteResult {
            expected: count,
            got: hashtags,
        });
    }

    Ok(HashtagResponse {
        model,
        count,
        hashtags,
    })
}

/// Runs the pipeline against a shared generator.
#[derive(Clone)]
pub struct HashtagService {
    generator: Arc<dyn Generator>,
    default_model: String,
    options: GenerationOptions,
}

impl std::fmt::Debug for HashtagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashtagService")
            .field("default_model", &self.default_model)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl HashtagService {
    /// Create a service over any generator.
    pub fn new(generator: Arc<dyn Generator>, backend: &BackendConfig) -> Self {
        Self {
            generator,
            default_model: backend.default_model.clone(),
            options: backend.options(),
        }
    }

    /// Create a service talking to the configured HTTP backend.
    pub fn from_config(backend: &BackendConfig) -> Result<Self> {
        let client = OllamaClient::new(backend)?;
        tracing::debug!("Generation backend: {}", client.generate_url());
        Ok(Self::new(Arc::new(client), backend))
    }

    /// Model used when a request names none
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Build the backend job for a validated request.
    pub fn prepare(&self, request: &ValidatedRequest) -> GenerationJob {
        GenerationJob::new(
            request.model.clone(),
            build_prompt(&request.text, request.count),
            build_schema(request.count),
            self.options.clone(),
        )
    }

    /// Run the whole pipeline for one request.
    #[tracing::instrument(
        name = "hashtags",
        skip_all,
        fields(request_id = %uuid::Uuid::new_v4(), model = Empty, count = Empty)
    )]
    pub async fn generate(&self, request: &HashtagRequest) -> Result<HashtagResponse> {
        let result = self.run(request).await;

        match &result {
            Ok(response) => tracing::info!(hashtags = response.count, "hashtags generated"),
            Err(e) => tracing::warn!(kind = e.kind(), error = %e, "hashtag generation failed"),
        }

        result
    }

    async fn run(&self, request: &HashtagRequest) -> Result<HashtagResponse> {
        let request = request.validate(&self.default_model)?;

        let span = tracing::Span::current();
        span.record("model", request.model.as_str());
        span.record("count", request.count);

        let job = self.prepare(&request);
        tracing::trace!(prompt = %job.prompt, "prompt built");

        let generated = self.generator.generate(&job).await?;
        let candidates = parse_candidates(&generated.raw_text)?;
        tracing::debug!(candidates = candidates.len(), "candidates parsed");

        let hashtags = sanitize(&candidates, request.count);
        assemble(request.model, request.count, hashtags)
    }
}
