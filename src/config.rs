// ⚙️ Server configuration - TOML file with defaults, CLI flags on top

use crate::validation::{Limits, DEFAULT_MAX_BULK, DEFAULT_MIN_BIN_LENGTH};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DATA_PATH: &str = "data/bins_all.csv";
pub const DEFAULT_LOG_FILTER: &str = "bin_lookup=info,bin_server=info,tower_http=info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,

    /// CSV dataset
    pub data_path: PathBuf,

    /// Load the dataset once at startup instead of per request
    pub preload: bool,

    pub min_bin_length: usize,
    pub max_bulk: usize,

    /// tracing filter directive; RUST_LOG still wins when set
    pub log_level: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            preload: false,
            min_bin_length: DEFAULT_MIN_BIN_LENGTH,
            max_bulk: DEFAULT_MAX_BULK,
            log_level: None,
        }
    }
}

impl ServerConfig {
    /// Load from a TOML file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(content).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_bin_length == 0 {
            bail!("min_bin_length must be at least 1");
        }
        if self.max_bulk == 0 {
            bail!("max_bulk must be at least 1");
        }
        if self.data_path.as_os_str().is_empty() {
            bail!("data_path must not be empty");
        }
        if self.bind_addr.trim().is_empty() {
            bail!("bind_addr must not be empty");
        }
        Ok(())
    }

    pub fn limits(&self) -> Limits {
        Limits {
            min_bin_length: self.min_bin_length,
            max_bulk: self.max_bulk,
        }
    }

    pub fn log_filter(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
