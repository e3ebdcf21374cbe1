//! Hashtag HTTP server.
//!
//! Endpoints:
//! - `POST /hashtags` - run the generation pipeline
//! - `GET /health` - liveness
//!
//! # Example
//!
//! ```rust,ignore
//! use hashtags::{Config, HashtagService};
//! use hashtags::server::{AppState, Server, ServerConfig};
//!
//! let config = Config::load(None)?;
//! let service = HashtagService::from_config(&config.backend)?;
//! let server_config = ServerConfig::try_from(&config.server)?;
//! Server::new(AppState::new(server_config, service)).run().await?;
//! ```

mod config;
mod handlers;
mod listener;
mod state;

pub use config::ServerConfig;
pub use handlers::{create_router, HealthResponse};
pub use listener::Server;
pub use state::AppState;
