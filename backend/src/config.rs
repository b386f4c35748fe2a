//! Server configuration file support.
//!
//! Configuration is read once at startup from a TOML file, then overridden
//! by a few environment variables, and is immutable afterwards.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 7778
//!
//! [timezone]
//! api_key = "..."
//! base_url = "https://maps.googleapis.com/maps/api/timezone/json"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "ASTRO_CONFIG";

/// Environment variable overriding the timezone API key.
pub const API_KEY_ENV: &str = "TIMEZONE_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("No astro-server.toml found in standard locations")]
    NotFound,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub timezone: TimezoneSettings,
}

/// Listening address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Timezone lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TimezoneSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TimezoneSettings {
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7778
}

fn default_base_url() -> String {
    "https://maps.googleapis.com/maps/api/timezone/json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AppConfig)` if successful
    /// * `Err(ConfigError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from the default location.
    ///
    /// Searches, in order:
    /// 1. The file named by `ASTRO_CONFIG`
    /// 2. `astro-server.toml` in the current directory
    /// 3. `backend/astro-server.toml`
    /// 4. `../astro-server.toml`
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let mut search_paths = Vec::new();
        if let Ok(explicit) = env::var(CONFIG_PATH_ENV) {
            search_paths.push(PathBuf::from(explicit));
        }
        search_paths.extend([
            PathBuf::from("astro-server.toml"),
            PathBuf::from("backend/astro-server.toml"),
            PathBuf::from("../astro-server.toml"),
        ]);

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Apply `HOST`, `PORT` and `TIMEZONE_API_KEY` overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|s| s.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(key) = env::var(API_KEY_ENV) {
            self.timezone.api_key = Some(key);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 8080

[timezone]
api_key = "abc123"
base_url = "http://localhost:9999/tz"
timeout_secs = 5
"#;

        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.timezone.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.timezone.base_url, "http://localhost:9999/tz");
        assert_eq!(config.timezone.timeout_secs, 5);
        assert!(config.timezone.has_api_key());
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 7778);
        assert_eq!(config.timezone.timeout_secs, 30);
        assert!(!config.timezone.has_api_key());
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config: AppConfig = toml::from_str("[timezone]\napi_key = \"\"\n").unwrap();
        assert!(!config.timezone.has_api_key());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 9000").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_from_file_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let err = AppConfig::from_file("/nonexistent/astro-server.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
