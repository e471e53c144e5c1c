//! Configuration loading and data folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TOML configuration shared by the Terrace services
///
/// All fields are optional; command-line arguments and environment
/// variables take precedence over values read from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Port the HTTP server listens on
    pub port: Option<u16>,
    /// Path to the SQLite database file
    pub database_path: Option<PathBuf>,
    /// External football data provider settings
    #[serde(default)]
    pub api_football: ProviderSettings,
}

/// Settings for the API-Football provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// API key sent with every request
    pub key: Option<String>,
    /// Override for the provider base URL (used in tests and proxies)
    pub base_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Minimum spacing between provider requests in milliseconds
    pub min_interval_ms: Option<u64>,
}

/// Load configuration following the standard priority order:
/// 1. Explicit path from the command line (must exist)
/// 2. Platform config file, if present
/// 3. Built-in defaults
pub fn load_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return load_toml_config(path);
    }

    match find_config_file() {
        Some(path) => load_toml_config(&path),
        None => Ok(TomlConfig::default()),
    }
}

/// Parse a TOML configuration file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Cannot read config file {:?}: {}", path, e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Cannot parse config file {:?}: {}", path, e)))
}

/// Locate the configuration file for the platform, if one exists
fn find_config_file() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/terrace/terrace.toml first, then /etc/terrace/terrace.toml
        let user_config = dirs::config_dir().map(|d| d.join("terrace").join("terrace.toml"));
        if let Some(path) = user_config {
            if path.exists() {
                return Some(path);
            }
        }
        let system_config = PathBuf::from("/etc/terrace/terrace.toml");
        if system_config.exists() {
            return Some(system_config);
        }
        None
    } else {
        let path = dirs::config_dir().map(|d| d.join("terrace").join("terrace.toml"))?;
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}

/// Get OS-dependent default data folder path
pub fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/terrace (or /var/lib/terrace for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("terrace"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/terrace"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/terrace
        dirs::data_dir()
            .map(|d| d.join("terrace"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/terrace"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\terrace
        dirs::data_local_dir()
            .map(|d| d.join("terrace"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\terrace"))
    } else {
        PathBuf::from("./terrace_data")
    }
}

/// Default database file location inside the data folder
pub fn default_database_path() -> PathBuf {
    default_data_folder().join("terrace.db")
}
