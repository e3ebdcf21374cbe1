//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files
//! - Environment variables
//! - CLI arguments (applied by the binary)
//!
//! Precedence, lowest first: defaults, file, environment, CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::GenerationOptions;
use crate::error::{HashtagError, Result};
use crate::request::DEFAULT_MODEL;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSection,

    /// Generation backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HashtagError::Config(format!("Failed to read config file {}: {e}", path.display()))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Default config file location (`<config dir>/hashtags/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hashtags").join("config.toml"))
    }

    /// Load from `path`, or from the default location when it exists, then
    /// apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!("Loading config from {}", path.display());
                    Self::from_file(path)?
                },
                None => Self::default(),
            },
        };

        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `HASHTAGS_*` overrides read through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HASHTAGS_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Some(secs) = lookup("HASHTAGS_BACKEND_TIMEOUT_SECS") {
            self.backend.timeout_secs = secs.parse().map_err(|_| {
                HashtagError::Config(format!(
                    "HASHTAGS_BACKEND_TIMEOUT_SECS is not a number: {secs}"
                ))
            })?;
        }
        if let Some(model) = lookup("HASHTAGS_MODEL") {
            self.backend.default_model = model;
        }
        if let Some(host) = lookup("HASHTAGS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HASHTAGS_PORT") {
            self.server.port = port.parse().map_err(|_| {
                HashtagError::Config(format!("HASHTAGS_PORT is not a port: {port}"))
            })?;
        }

        Ok(self)
    }

    /// Check values that would make the service unusable.
    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(HashtagError::Config("backend.base_url is empty".to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(HashtagError::Config(
                "backend.timeout_secs must be positive".to_string(),
            ));
        }
        if self.backend.num_ctx == 0 || self.backend.num_predict == 0 {
            return Err(HashtagError::Config(
                "backend.num_ctx and backend.num_predict must be positive".to_string(),
            ));
        }
        if self.backend.default_model.trim().is_empty() {
            return Err(HashtagError::Config(
                "backend.default_model is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| HashtagError::Config(format!("Failed to render config: {e}")))
    }
}

/// HTTP server section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Enable permissive CORS
    pub cors_enabled: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_size: 1024 * 1024, // 1 MB
            cors_enabled: true,
        }
    }
}

impl ServerSection {
    /// Get the full listen address
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Generation backend section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend base URL (e.g., http://localhost:11434)
    pub base_url: String,

    /// Timeout for the whole backend call, in seconds
    pub timeout_secs: u64,

    /// Model used when the request names none
    pub default_model: String,

    /// Context window passed to the backend
    pub num_ctx: u32,

    /// Output token bound passed to the backend
    pub num_predict: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            timeout_secs: 90,
            default_model: DEFAULT_MODEL.to_string(),
            num_ctx: 2048,
            num_predict: 512,
        }
    }
}

impl BackendConfig {
    /// Backend call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// URL of the generate endpoint
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    /// Sampling options for every job
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions::deterministic(self.num_ctx, self.num_predict)
    }
}
