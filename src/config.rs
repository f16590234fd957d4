//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `reading-store.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: where the http listener binds.
//!     - LoggingConfig: default log level when RUST_LOG is unset.
//!
//! ==============================================================================

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl ServiceConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))
    }

    /// Load with default fallback
    ///
    /// runs before the subscriber is installed, so outcomes are returned as
    /// a note for the caller to log rather than logged here.
    pub fn load_or_default() -> (Self, String) {
        let paths = [
            PathBuf::from("config").join("reading-store.toml"),
            PathBuf::from("..").join("config").join("reading-store.toml"),
        ];

        let mut note = "No config file found - using defaults".to_string();
        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        return (config, format!("Loaded from {}", path.display()));
                    }
                    Err(e) => {
                        note = format!("Failed to load {}: {} - using defaults", path.display(), e);
                    }
                }
            }
        }

        (Self::default(), note)
    }

    /// Address the http listener binds to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.bind_address, self.server.port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Invalid listen address {}:{}: {}",
                    self.server.bind_address,
                    self.server.port,
                    e
                )
            })
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        tracing::info!(
            bind_address = %self.server.bind_address,
            port = self.server.port,
            log_level = %self.logging.level,
            "service configuration"
        );
    }
}
