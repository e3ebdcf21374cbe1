//! Server state.

use std::time::{Duration, Instant};

use super::config::ServerConfig;
use crate::pipeline::HashtagService;

/// Application state shared across handlers.
///
/// Read-only after construction, so handlers share it without locking.
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Hashtag pipeline
    pub service: HashtagService,
    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ServerConfig, service: HashtagService) -> Self {
        Self {
            config,
            service,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}
