//! Session configuration.
//!
//! Game thresholds are fixed constants in the rule modules; only session
//! plumbing is configurable here. Values come from, in order:
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `evolve.toml` (overrides defaults, every key optional)
//! 3. Command-line flags (applied by the binary)
//!
//! ## Example `evolve.toml`
//!
//! ```toml
//! [session]
//! seed = 42
//!
//! [storage]
//! backend = "sqlite"
//! path = "world.db"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Fixed seed for a reproducible session; entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: "world.db".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Reads a TOML config file. A missing file yields the defaults; a file
    /// that exists but does not parse or validate is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration parameters.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.storage.path.trim().is_empty(),
            "Storage path must not be empty"
        );
        anyhow::ensure!(
            ["trace", "debug", "info", "warn", "error", "off"]
                .contains(&self.logging.level.to_ascii_lowercase().as_str()),
            "Unknown log level '{}'",
            self.logging.level
        );
        Ok(())
    }
}
