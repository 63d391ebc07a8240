//! Server configuration from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3005;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is invalid: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `TASKDECK_BIND` and `TASKDECK_PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("TASKDECK_BIND") {
            config.bind = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "TASKDECK_BIND",
                value: raw.clone(),
            })?;
        }
        if let Some(raw) = lookup("TASKDECK_PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "TASKDECK_PORT",
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([0, 0, 0, 0], 3005)));
    }

    #[test]
    fn test_overrides_and_errors() {
        let config = ServerConfig::from_lookup(|name| match name {
            "TASKDECK_BIND" => Some("127.0.0.1".to_string()),
            "TASKDECK_PORT" => Some("8081".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.addr(), SocketAddr::from(([127, 0, 0, 1], 8081)));

        let err = ServerConfig::from_lookup(|name| {
            (name == "TASKDECK_PORT").then(|| "http".to_string())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "TASKDECK_PORT",
                value: "http".to_string()
            }
        );
    }
}
