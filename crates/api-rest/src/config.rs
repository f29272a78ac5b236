//! REST runtime configuration.
//!
//! Resolved once at process startup and passed into the router; handlers never read the
//! environment.

use std::net::SocketAddr;

/// Address used when `IMPLANTX_REST_ADDR` is unset or empty.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid REST address {addr:?}: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("API key cannot be whitespace only")]
    BlankApiKey,
}

/// REST configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct RestConfig {
    addr: SocketAddr,
    api_key: Option<String>,
}

impl RestConfig {
    /// Create a new `RestConfig`.
    ///
    /// An empty key leaves the API open; a key made only of whitespace is rejected since it is
    /// almost certainly a broken `.env` line.
    pub fn new(addr: SocketAddr, api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = match api_key {
            Some(key) if key.is_empty() => None,
            Some(key) if key.trim().is_empty() => return Err(ConfigError::BlankApiKey),
            other => other,
        };

        Ok(Self { addr, api_key })
    }

    /// Build from raw environment values (`IMPLANTX_REST_ADDR`, `IMPLANTX_API_KEY`).
    pub fn from_env_values(
        addr: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr = addr
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_REST_ADDR.to_string());
        let parsed = addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr { addr, source })?;

        Self::new(parsed, api_key)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = RestConfig::from_env_values(None, None).expect("default config");
        assert_eq!(cfg.addr().to_string(), DEFAULT_REST_ADDR);
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let cfg = RestConfig::from_env_values(Some("  ".into()), Some(String::new()))
            .expect("config");
        assert_eq!(cfg.addr().to_string(), DEFAULT_REST_ADDR);
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn rejects_unparseable_address() {
        let err = RestConfig::from_env_values(Some("localhost".into()), None)
            .expect_err("hostnames are not socket addresses");
        assert!(matches!(err, ConfigError::InvalidAddr { .. }));
    }

    #[test]
    fn rejects_whitespace_key() {
        let err = RestConfig::from_env_values(None, Some("   ".into())).expect_err("blank key");
        assert!(matches!(err, ConfigError::BlankApiKey));
    }

    #[test]
    fn keeps_configured_key() {
        let cfg = RestConfig::from_env_values(Some("127.0.0.1:8080".into()), Some("s3cret".into()))
            .expect("config");
        assert_eq!(cfg.addr().port(), 8080);
        assert_eq!(cfg.api_key(), Some("s3cret"));
    }
}
