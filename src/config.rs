//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `PANEL_API_URL` - REST API root (default: `http://localhost:8000/api`)
//! - `PANEL_BACKEND` - `http` or `memory` (default: `http`)
//! - `RUST_LOG` - log filter, read by the binary (default: `info`)

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Http,
    Memory,
}

#[derive(Clone, Debug)]
pub struct PanelConfig {
    pub api_url: Url,
    pub backend: BackendKind,
}

impl PanelConfig {
    /// Load configuration from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = lookup("PANEL_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("PANEL_API_URL".into(), e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "PANEL_API_URL".into(),
                format!("unsupported scheme {}", api_url.scheme()),
            ));
        }

        let backend = match lookup("PANEL_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("http") => BackendKind::Http,
            Some("memory") => BackendKind::Memory,
            Some(other) => {
                return Err(ConfigError::InvalidEnvVar("PANEL_BACKEND".into(), format!("unknown backend {other}")))
            }
        };

        Ok(Self { api_url, backend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<PanelConfig, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        PanelConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:8000/api");
        assert_eq!(config.backend, BackendKind::Http);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[("PANEL_API_URL", "https://ops.example.com/v2/"), ("PANEL_BACKEND", "memory")]).unwrap();
        assert_eq!(config.api_url.host_str(), Some("ops.example.com"));
        assert_eq!(config.backend, BackendKind::Memory);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("PANEL_API_URL", "not a url")]).is_err());
        assert!(load(&[("PANEL_API_URL", "ftp://files.example.com")]).is_err());
        assert!(load(&[("PANEL_BACKEND", "postgres")]).is_err());
    }
}
