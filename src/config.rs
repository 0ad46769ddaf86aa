//! Configuration loading
//!
//! Reads `~/.config/flyfish/config.toml`. A missing file yields defaults;
//! a malformed file is reported so the user can fix it.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

mod types;

pub use types::{ChatConfig, Config, PriceConfig, WalletConfig};

const CONFIG_DIR: &str = "flyfish";
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Default config file location
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the config from the default location, falling back to defaults
pub fn load_config() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load the config from an explicit path
pub fn load_config_from_path(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_config_toml(&contents).map_err(|message| ConfigError::Parse {
        path: path.display().to_string(),
        message,
    })
}

pub fn parse_config_toml(content: &str) -> Result<Config, String> {
    toml::from_str::<Config>(content).map_err(|e| e.to_string())
}
