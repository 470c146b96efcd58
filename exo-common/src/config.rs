//! Bootstrap configuration loading
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Compiled defaults
//!
//! Tiers 1 and 2 are handled by each binary's clap parser; this module owns
//! tiers 3 and 4. A missing config file is not an error: a warning is logged
//! and compiled defaults are used.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "EXO_CONFIG";

/// Upstream catalog query: name, radius, equilibrium temperature and host
/// star temperature for every confirmed planet, as CSV
pub const DEFAULT_CATALOG_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync?query=select+pl_name,pl_rade,pl_eqt,st_teff+from+pscomppars&format=csv";

/// Default exo-api port
pub const DEFAULT_PORT: u16 = 5780;

/// Default cap on concurrent lookups/submissions issued by the client
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// exo-api HTTP port
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite ratings database
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Upstream CSV catalog fetched by exo-api
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,

    /// exo-api base URL used by exo-browse
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Maximum concurrent rating lookups or submissions per batch
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is unset (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_path: default_database_path(),
            catalog_url: default_catalog_url(),
            api_url: default_api_url(),
            max_in_flight: default_max_in_flight(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("exorate"))
        .unwrap_or_else(|| PathBuf::from("./exorate_data"))
        .join("ratings.db")
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_api_url() -> String {
    format!("http://127.0.0.1:{}", DEFAULT_PORT)
}

fn default_max_in_flight() -> usize {
    DEFAULT_MAX_IN_FLIGHT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse and validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: TomlConfig =
            toml::from_str(text).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// An explicitly requested file must exist. Without one, the
    /// [`CONFIG_ENV_VAR`] path and then the platform default path are tried;
    /// if neither exists the compiled defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let text = std::fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
            })?;
            info!("Loaded configuration from {}", path.display());
            return Self::from_toml_str(&text);
        }

        match resolve_config_path() {
            Some(path) if path.exists() => {
                let text = std::fs::read_to_string(&path)?;
                info!("Loaded configuration from {}", path.display());
                Self::from_toml_str(&text)
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using compiled defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("Could not determine config directory, using compiled defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_in_flight == 0 {
            return Err(Error::Config("max_in_flight must be at least 1".to_string()));
        }
        if self.catalog_url.trim().is_empty() {
            return Err(Error::Config("catalog_url must not be empty".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Config file location: [`CONFIG_ENV_VAR`] if set, else
/// `<config_dir>/exorate/config.toml`
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir().map(|d| d.join("exorate").join("config.toml"))
}
