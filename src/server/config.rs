//! Server configuration
//!
//! Loads `config.toml` with `GSFS_*` environment overrides and validates
//! it. The root list is ordered; only the first entry is active by design,
//! and a missing root path fails fast.

use config::{Config, Environment, File};
use serde::Deserialize;

/// One configured root: a filesystem path and an optional display name for
/// the widget.
#[derive(Debug, Deserialize, Clone)]
pub struct RootConfig {
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Complete server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Ordered root list; only the first entry is honored
    #[serde(default)]
    pub roots: Vec<RootConfig>,

    /// Maximum upload size in kilobytes (0 = unlimited)
    #[serde(default)]
    pub max_upload_size_kb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            roots: vec![RootConfig {
                path: "./server_root".to_string(),
                name: None,
            }],
            max_upload_size_kb: 0,
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("GSFS"))
            .build()?;
        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the active root, when one is configured with a non-empty
    /// path.
    pub fn active_root(&self) -> Option<&str> {
        self.roots
            .first()
            .map(|root| root.path.as_str())
            .filter(|path| !path.is_empty())
    }

    /// Bind address and port as a socket address string.
    pub fn bind_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }
        if self.active_root().is_none() {
            return Err(config::ConfigError::Message(
                "a root with a non-empty path must be configured".into(),
            ));
        }
        Ok(())
    }
}
