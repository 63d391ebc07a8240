//! Client configuration from the environment

use std::time::Duration;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:3005/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Identity whose tasks the API-backed view shows.
///
/// Stands in for an authenticated session; the owner is always supplied
/// by the caller, never assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub owner_id: i64,
}

impl Session {
    pub fn new(owner_id: i64) -> Self {
        Self { owner_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the resource paths are appended to, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Owner for the task view, if configured
    pub owner_id: Option<i64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            owner_id: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Read `TASKDECK_API_URL`, `TASKDECK_TIMEOUT_SECS` and
    /// `TASKDECK_OWNER_ID`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("TASKDECK_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        };

        if let Some(raw) = lookup("TASKDECK_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::config(format!("TASKDECK_TIMEOUT_SECS is not a number: {raw}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("TASKDECK_OWNER_ID") {
            let owner: i64 = raw.trim().parse().map_err(|_| {
                ClientError::config(format!("TASKDECK_OWNER_ID is not an integer: {raw}"))
            })?;
            config.owner_id = Some(owner);
        }

        Ok(config)
    }

    /// Session for the API-backed task view
    pub fn session(&self) -> Result<Session> {
        self.owner_id
            .map(Session::new)
            .ok_or_else(|| ClientError::config("TASKDECK_OWNER_ID is not set"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, "http://localhost:3005/api");
        assert!(config.session().is_err());
    }

    #[test]
    fn test_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TASKDECK_API_URL", "https://tasks.example.com/api/"),
            ("TASKDECK_TIMEOUT_SECS", "3"),
            ("TASKDECK_OWNER_ID", " 42 "),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://tasks.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.session().unwrap(), Session::new(42));
    }

    #[test]
    fn test_rejects_malformed_values() {
        let err = ClientConfig::from_lookup(lookup(&[("TASKDECK_OWNER_ID", "me")])).unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));

        let err =
            ClientConfig::from_lookup(lookup(&[("TASKDECK_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::Config { .. }));
    }
}
