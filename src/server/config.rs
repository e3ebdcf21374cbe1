//! Server configuration.

use std::net::SocketAddr;

use crate::config::ServerSection;
use crate::error::{HashtagError, Result};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub addr: SocketAddr,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
    /// CORS enabled
    pub cors_enabled: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_body_size: 1024 * 1024, // 1MB
            cors_enabled: true,
        }
    }
}

impl TryFrom<&ServerSection> for ServerConfig {
    type Error = HashtagError;

    fn try_from(section: &ServerSection) -> Result<Self> {
        let addr = section.listen_addr().parse().map_err(|e| {
            HashtagError::Config(format!("Invalid listen address {}: {e}", section.listen_addr()))
        })?;

        Ok(Self {
            addr,
            max_body_size: section.max_body_size,
            cors_enabled: section.cors_enabled,
        })
    }
}

impl ServerConfig {
    /// Create with custom port
    pub fn with_port(mut self, port: u16) -> Self {
        self.addr.set_port(port);
        self
    }

    /// Bind to all interfaces
    pub fn bind_all(mut self) -> Self {
        self.addr = SocketAddr::from(([0, 0, 0, 0], self.addr.port()));
        self
    }

    /// Set address directly
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Set max body size
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    /// Disable CORS
    pub fn without_cors(mut self) -> Self {
        self.cors_enabled = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_section() {
        let section = ServerSection {
            host: "0.0.0.0".to_string(),
            port: 9000,
            max_body_size: 4096,
            cors_enabled: false,
        };
        let config = ServerConfig::try_from(&section).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:9000");
        assert_eq!(config.max_body_size, 4096);
        assert!(!config.cors_enabled);
    }

    #[test]
    fn test_from_section_bad_host() {
        let section = ServerSection {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(ServerConfig::try_from(&section).is_err());
    }

    #[test]
    fn test_builders() {
        let config = ServerConfig::default().with_port(3000).bind_all();
        assert_eq!(config.addr.to_string(), "0.0.0.0:3000");
    }
}
