//! HTTP server configuration parsing from environment variables.

use super::{EnvSource, parse_or};
use anyhow::{Context, Result};
use std::net::{IpAddr, SocketAddr};

/// Server environment configuration
#[derive(Debug, Clone)]
pub struct ServerEnvConfig {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl Default for ServerEnvConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::from([0, 0, 0, 0]),
            port: 10000,
        }
    }
}

impl ServerEnvConfig {
    pub fn from_source(source: &EnvSource) -> Result<Self> {
        let bind_address = match source("SERVER_BIND_ADDRESS") {
            Some(raw) => raw
                .parse::<IpAddr>()
                .context(format!("Invalid SERVER_BIND_ADDRESS: {}", raw))?,
            None => Self::default().bind_address,
        };

        Ok(Self {
            bind_address,
            port: parse_or(source, "SERVER_PORT", 10000)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::map_source;

    #[test]
    fn test_server_config_defaults() {
        let config = ServerEnvConfig::from_source(&map_source(&[])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:10000");
    }

    #[test]
    fn test_server_config_overrides() {
        let source = map_source(&[("SERVER_BIND_ADDRESS", "127.0.0.1"), ("SERVER_PORT", "8081")]);
        let config = ServerEnvConfig::from_source(&source).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn test_invalid_port_is_error() {
        let source = map_source(&[("SERVER_PORT", "99999")]);
        assert!(ServerEnvConfig::from_source(&source).is_err());
    }
}
