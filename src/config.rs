//! Runtime configuration
//!
//! Settings merge with precedence: built-in defaults, then an optional TOML
//! file, then `CANOPY_*` environment variables (highest).

use crate::error::Error;
use crate::logging::LoggingConfig;
use crate::store::remote::HttpRemote;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the remote node store.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for remote calls, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: default_api_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings, optionally merging a config file under the
    /// environment overrides.
    pub fn load(file: Option<&Path>) -> Result<Self, Error> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file));
        }
        builder = builder.add_source(config::Environment::with_prefix("CANOPY").separator("__"));
        let merged = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to load configuration: {}", e)))?;
        merged
            .try_deserialize()
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Build the HTTP remote client from these settings.
    pub fn remote(&self) -> Result<HttpRemote, Error> {
        HttpRemote::new(&self.api_base_url, self.request_timeout())
    }
}
