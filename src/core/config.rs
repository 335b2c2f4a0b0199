//! Bot configuration
//!
//! Loaded from a TOML file; every section is optional and falls back to
//! its defaults. A few values may be overridden from the environment.

use crate::core::error::{BotError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default endpoint for posting broadcasts
pub const DEFAULT_BROADCAST_URL: &str = "https://api.douban.com/shuo/v2/statuses/";

/// Default log filter when neither the config nor RUST_LOG sets one
pub const DEFAULT_LOG_FILTER: &str = "bot_commands=info";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub broadcast: BroadcastConfig,
    pub commands: CommandFeatures,
    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            broadcast: BroadcastConfig::default(),
            commands: CommandFeatures::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Settings for the external broadcast API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BroadcastConfig {
    pub api_url: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BROADCAST_URL.to_string(),
        }
    }
}

/// Switches for commands that exist in code but are not always registered
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandFeatures {
    /// Register `unwatch`. Off unless explicitly enabled.
    pub unwatch: bool,
}

impl BotConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BotConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            BotError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply environment overrides
    ///
    /// Optional: BROADCAST_API_URL
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("BROADCAST_API_URL") {
            self.broadcast.api_url = url;
        }
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.broadcast.api_url.trim().is_empty() {
            return Err(BotError::Config("broadcast.api_url must not be empty".into()));
        }
        Ok(())
    }
}
