//! Logging System
//!
//! Structured logging via the `tracing` crate: configurable level, text or
//! JSON format, stderr and/or file output. The `CANOPY_LOG` environment
//! variable overrides the configured level filter; `CANOPY_LOG_FILE`
//! overrides the log file location.

use crate::error::Error;
use serde::Deserialize;
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stderr, file, both
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output includes file; None means use the runtime
    /// default.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
        }
    }
}

/// Resolve the log file path with precedence: config file field,
/// CANOPY_LOG_FILE env, platform state directory default.
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf, Error> {
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    if let Ok(env_path) = std::env::var("CANOPY_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    let project_dirs = directories::ProjectDirs::from("", "canopy", "canopy").ok_or_else(|| {
        Error::Config("Could not determine platform state directory for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| project_dirs.data_local_dir().to_path_buf());
    Ok(dir.join("canopy.log"))
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_env("CANOPY_LOG") {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, Error> {
    let path = resolve_log_file_path(config.file.clone())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create log directory: {}", e)))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::Config(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Initialize the global tracing subscriber.
///
/// Errors if called twice in one process; callers initializing for tests
/// should ignore the result.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Error> {
    if !config.enabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))?;
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let json = config.format == "json";
    let base = Registry::default().with(filter);

    let result = match config.output.as_str() {
        "file" => {
            let file = std::sync::Arc::new(open_log_file(config)?);
            if json {
                base.with(fmt::layer().json().with_writer(file)).try_init()
            } else {
                base.with(fmt::layer().with_ansi(false).with_writer(file))
                    .try_init()
            }
        }
        "both" => {
            let file = std::sync::Arc::new(open_log_file(config)?);
            let writer = file.and(std::io::stderr);
            if json {
                base.with(fmt::layer().json().with_writer(writer)).try_init()
            } else {
                base.with(fmt::layer().with_ansi(false).with_writer(writer))
                    .try_init()
            }
        }
        _ => {
            if json {
                base.with(fmt::layer().json().with_writer(std::io::stderr))
                    .try_init()
            } else {
                base.with(fmt::layer().with_writer(std::io::stderr)).try_init()
            }
        }
    };
    result.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}
