//! # Hashtags - LLM-backed hashtag generation
//!
//! Turns free-form text into exactly N hashtags by asking a local
//! Ollama-compatible backend for structured output, then re-validating
//! everything it returns.
//!
//! ## Pipeline
//!
//! ```text
//!  HashtagRequest
//!       │ validate (blank text -> InvalidInput, count clamped to 1..=30)
//!       v
//!  prompt + JSON schema
//!       │ POST /api/generate (temperature 0, CPU only, 90s timeout)
//!       v
//!  GenerationResult.response ──> parse {"hashtags": [...]}
//!       │
//!       v
//!  sanitize (trim, '#', '_' for spaces, grammar, case-insensitive dedup)
//!       │
//!       v
//!  assemble (exactly N or IncompleteResult with the salvaged list)
//! ```
//!
//! The schema sent to the backend only raises the hit rate. The backend is
//! treated as untrusted and its output is always checked against
//! [`schema::HASHTAG_PATTERN`] before anything reaches the caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hashtags::{BackendConfig, HashtagRequest, HashtagService};
//!
//! let service = HashtagService::from_config(&BackendConfig::default())?;
//! let response = service
//!     .generate(&HashtagRequest::new("Hoje é um lindo dia de sol").with_count(3))
//!     .await?;
//!
//! assert_eq!(response.hashtags().len(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`request`]: Input validation and defaults
//! - [`prompt`]: Instruction prompt rendering
//! - [`schema`]: Structured-output constraint and hashtag grammar
//! - [`backend`]: Generation backend trait and HTTP client
//! - [`parser`]: Extraction of candidates from generated text
//! - [`sanitizer`]: Normalization, validation and dedup
//! - [`pipeline`]: The end-to-end service and result assembly
//! - [`server`]: HTTP API server (Axum-based)
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod backend;
pub mod config;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod request;
pub mod sanitizer;
pub mod schema;
pub mod server;

// Re-exports for convenience
pub use backend::{GenerationJob, GenerationOptions, GenerationResult, Generator, OllamaClient};
pub use config::{BackendConfig, Config};
pub use error::{HashtagError, Result};
pub use pipeline::{assemble, HashtagResponse, HashtagService};
pub use request::{HashtagRequest, ValidatedRequest, DEFAULT_COUNT, DEFAULT_MODEL, MAX_COUNT};
pub use sanitizer::{is_valid_hashtag, sanitize};
pub use server::{AppState, Server, ServerConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
