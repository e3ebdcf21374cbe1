//! Generation backend abstraction.
//!
//! The pipeline talks to the backend through the [`Generator`] trait so the
//! HTTP client can be swapped for an in-process fake in tests.
//!
//! ```text
//! HashtagService ──> Generator::generate(job) ──> OllamaClient ──> POST /api/generate
//! ```

mod client;
mod types;

pub use client::OllamaClient;
pub use types::{GenerationJob, GenerationOptions, GenerationResult};

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// A text generation backend that runs one job per call.
///
/// Dropping the returned future abandons the call; implementations must not
/// keep work running in the background after that.
pub trait Generator: Send + Sync {
    /// Run `job` and return the backend's raw generated text.
    fn generate<'a>(
        &'a self,
        job: &'a GenerationJob,
    ) -> Pin<Box<dyn Future<Output = Result<GenerationResult>> + Send + 'a>>;
}
