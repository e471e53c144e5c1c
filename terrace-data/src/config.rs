//! Configuration resolution for terrace-data
//!
//! Provider settings resolve with ENV → TOML → default priority. A
//! missing API key is not fatal at startup; the provider rejects
//! unauthenticated calls and the import endpoint reports that as an
//! upstream failure.

use crate::services::api_football::DEFAULT_BASE_URL;
use std::time::Duration;
use terrace_common::config::TomlConfig;
use tracing::{info, warn};

const KEY_ENV_VAR: &str = "TERRACE_API_FOOTBALL_KEY";
const BASE_URL_ENV_VAR: &str = "TERRACE_API_FOOTBALL_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MIN_INTERVAL_MS: u64 = 500;

/// Resolved provider settings, ready to build a client from
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub min_interval: Duration,
}

/// Resolve provider settings from the environment and TOML config
pub fn resolve_provider_config(toml_config: &TomlConfig) -> ProviderConfig {
    let settings = &toml_config.api_football;

    let env_key = std::env::var(KEY_ENV_VAR).ok().filter(|k| is_valid_key(k));
    let key = match env_key {
        Some(key) => {
            info!("API-Football key loaded from environment variable");
            key
        }
        None => match settings.key.clone().filter(|k| is_valid_key(k)) {
            Some(key) => {
                info!("API-Football key loaded from TOML config");
                key
            }
            None => {
                warn!(
                    "No API-Football key configured ({} or api_football.key in TOML); \
                     provider requests will be rejected",
                    KEY_ENV_VAR
                );
                String::new()
            }
        },
    };

    let base_url = std::env::var(BASE_URL_ENV_VAR)
        .ok()
        .filter(|u| !u.trim().is_empty())
        .or_else(|| settings.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
    let min_interval =
        Duration::from_millis(settings.min_interval_ms.unwrap_or(DEFAULT_MIN_INTERVAL_MS));

    ProviderConfig {
        key,
        base_url,
        timeout,
        min_interval,
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use terrace_common::config::ProviderSettings;

    fn toml_config(key: Option<&str>, base_url: Option<&str>) -> TomlConfig {
        TomlConfig {
            port: None,
            database_path: None,
            api_football: ProviderSettings {
                key: key.map(String::from),
                base_url: base_url.map(String::from),
                timeout_secs: None,
                min_interval_ms: None,
            },
        }
    }

    fn clear_env() {
        std::env::remove_var(KEY_ENV_VAR);
        std::env::remove_var(BASE_URL_ENV_VAR);
    }

    #[test]
    #[serial]
    fn env_key_takes_priority_over_toml() {
        clear_env();
        std::env::set_var(KEY_ENV_VAR, "env-key");

        let config = resolve_provider_config(&toml_config(Some("toml-key"), None));
        assert_eq!(config.key, "env-key");

        clear_env();
    }

    #[test]
    #[serial]
    fn toml_key_used_when_env_unset() {
        clear_env();

        let config = resolve_provider_config(&toml_config(Some("toml-key"), None));
        assert_eq!(config.key, "toml-key");
    }

    #[test]
    #[serial]
    fn missing_key_resolves_to_empty_string() {
        clear_env();

        let config = resolve_provider_config(&toml_config(None, None));
        assert_eq!(config.key, "");
    }

    #[test]
    #[serial]
    fn blank_key_counts_as_missing() {
        clear_env();
        std::env::set_var(KEY_ENV_VAR, "   ");

        let config = resolve_provider_config(&toml_config(Some("toml-key"), None));
        assert_eq!(config.key, "toml-key");

        clear_env();
    }

    #[test]
    #[serial]
    fn base_url_falls_back_to_default() {
        clear_env();

        let config = resolve_provider_config(&toml_config(None, None));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        let config = resolve_provider_config(&toml_config(None, Some("http://localhost:9000")));
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    #[serial]
    fn timeouts_have_defaults() {
        clear_env();

        let config = resolve_provider_config(&toml_config(None, None));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.min_interval, Duration::from_millis(500));
    }
}
