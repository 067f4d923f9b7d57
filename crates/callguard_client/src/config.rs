//! Client configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where the backend lives and how long to wait for it.
///
/// The analyze endpoint is deployed separately from the main API, so it
/// carries its own full URL rather than a path under `base_url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub analyze_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            analyze_url: "http://127.0.0.1:8081/analyze-call".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Load from a TOML file; missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let partial: PartialConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        let defaults = Self::default();
        Ok(Self {
            base_url: partial.base_url.unwrap_or(defaults.base_url),
            analyze_url: partial.analyze_url.unwrap_or(defaults.analyze_url),
            timeout_secs: partial.timeout_secs.unwrap_or(defaults.timeout_secs),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    base_url: Option<String>,
    analyze_url: Option<String>,
    timeout_secs: Option<u64>,
}
