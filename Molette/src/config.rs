//! Configuration: YAML file plus environment overrides
//!
//! Precedence, lowest to highest: built-in defaults, the YAML file (path
//! from the command line or `MOLETTE_CONFIG`), then `MOLETTE_*`
//! environment variables.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Environment variable pointing at the config file
pub const ENV_CONFIG_FILE: &str = "MOLETTE_CONFIG";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Player-state poll interval in milliseconds
    pub poll_interval_ms: u64,
    /// Hold time for a long press in milliseconds
    pub long_press_ms: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Identifier of the player the remote controls
    pub player_id: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: molapi::DEFAULT_PORT,
            player_id: "molette".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            poll_interval_ms: 1000,
            long_press_ms: 2000,
        }
    }
}

impl Config {
    /// Load the configuration, starting from `path` if given, otherwise
    /// from `MOLETTE_CONFIG`, otherwise the defaults. Environment
    /// overrides apply on top in every case.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(PathBuf::from)
            .or_else(|| env::var(ENV_CONFIG_FILE).ok().map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                let config: Config = serde_yaml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?;
                info!("Loaded configuration from {}", path.display());
                config
            }
            None => Config::default(),
        };

        config.apply_overrides(env::vars());
        Ok(config)
    }

    /// Apply `MOLETTE_*` overrides from an iterator of key/value pairs.
    ///
    /// Unparseable numeric values are logged and skipped rather than
    /// failing the whole load.
    pub fn apply_overrides(&mut self, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            match key.as_str() {
                "MOLETTE_HOST" => self.server.host = value,
                "MOLETTE_PORT" => match value.parse() {
                    Ok(port) => self.server.port = port,
                    Err(_) => warn!("Ignoring invalid MOLETTE_PORT: {value}"),
                },
                "MOLETTE_PLAYER_ID" => self.server.player_id = value,
                "MOLETTE_POLL_INTERVAL_MS" => match value.parse() {
                    Ok(ms) => self.poll_interval_ms = ms,
                    Err(_) => warn!("Ignoring invalid MOLETTE_POLL_INTERVAL_MS: {value}"),
                },
                "MOLETTE_LONG_PRESS_MS" => match value.parse() {
                    Ok(ms) => self.long_press_ms = ms,
                    Err(_) => warn!("Ignoring invalid MOLETTE_LONG_PRESS_MS: {value}"),
                },
                _ => {}
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn long_press_hold(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 8095);
        assert_eq!(config.poll_interval(), Duration::from_millis(1000));
        assert_eq!(config.long_press_hold(), Duration::from_millis(2000));
    }

    #[test]
    fn test_yaml_parse_with_partial_sections() {
        let yaml = r#"
server:
  host: music.local
  player_id: office
poll_interval_ms: 500
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.host, "music.local");
        assert_eq!(config.server.player_id, "office");
        // Untouched fields keep their defaults.
        assert_eq!(config.server.port, 8095);
        assert_eq!(config.long_press_ms, 2000);
        assert_eq!(config.poll_interval_ms, 500);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(vec![
            ("MOLETTE_HOST".to_string(), "10.0.0.5".to_string()),
            ("MOLETTE_PORT".to_string(), "9000".to_string()),
            ("MOLETTE_PLAYER_ID".to_string(), "kitchen".to_string()),
            ("MOLETTE_LONG_PRESS_MS".to_string(), "1500".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ]);

        assert_eq!(config.server.host, "10.0.0.5");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.player_id, "kitchen");
        assert_eq!(config.long_press_ms, 1500);
    }

    #[test]
    fn test_invalid_numeric_override_is_skipped() {
        let mut config = Config::default();
        config.apply_overrides(vec![(
            "MOLETTE_PORT".to_string(),
            "not-a-port".to_string(),
        )]);
        assert_eq!(config.server.port, 8095);
    }
}
