//! Cross-platform path utilities

use std::path::PathBuf;

const APP_DIR: &str = "tzrange";
const CONFIG_FILE: &str = "config.toml";

/// Get config directory
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Default location of the config file
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}
