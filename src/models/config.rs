//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Credentials;

/// Root application configuration.
///
/// Credentials are mandatory, so there is no default fallback: a config
/// file that fails to load is an error, not a degraded run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API credential material
    pub credentials: Credentials,

    /// HTTP client settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Request defaults applied by the CLI
    #[serde(default)]
    pub defaults: RequestDefaults,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Defaults merged into CLI-built search items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Response resources requested when none are given on the command line
    #[serde(default = "defaults::resources")]
    pub resources: Vec<String>,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            resources: defaults::resources(),
        }
    }
}

mod defaults {
    pub fn timeout() -> u64 {
        30
    }

    pub fn resources() -> Vec<String> {
        vec![
            "ItemInfo.Title".into(),
            "Offers.Listings.Price".into(),
            "Images.Primary.Medium".into(),
        ]
    }
}
