//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                  | Default                                            |
//! |---------------------------|----------------------------------------------------|
//! | `TILL_BIND_ADDR`          | `0.0.0.0`                                          |
//! | `PORT`                    | `5000`                                             |
//! | `TILL_DB_PATH`            | platform data dir, `till.db`                       |
//! | `TILL_DB_MAX_CONNECTIONS` | `5`                                                |
//! | `GEMINI_API_KEY`          | unset: summaries disabled                          |
//! | `GEMINI_MODEL`            | `gemini-1.5-flash`                                 |
//! | `GEMINI_BASE_URL`         | `https://generativelanguage.googleapis.com/v1beta` |
//! | `SUMMARY_TIMEOUT_SECS`    | unset: no client timeout                           |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to listen on
    pub bind_addr: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size
    pub db_max_connections: u32,

    /// Summary client settings
    pub summary: SummaryConfig,
}

/// Settings for the language model client.
#[derive(Clone)]
pub struct SummaryConfig {
    /// No key means summaries are disabled
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

// The key never goes to the logs.
impl std::fmt::Debug for SummaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in production,
    /// a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_path = match non_empty("TILL_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let config = ServerConfig {
            bind_addr: parse_or(
                "TILL_BIND_ADDR",
                non_empty("TILL_BIND_ADDR"),
                IpAddr::from([0, 0, 0, 0]),
            )?,

            port: parse_or("PORT", non_empty("PORT"), 5000)?,

            database_path,

            db_max_connections: parse_or(
                "TILL_DB_MAX_CONNECTIONS",
                non_empty("TILL_DB_MAX_CONNECTIONS"),
                5,
            )?,

            summary: SummaryConfig {
                api_key: non_empty("GEMINI_API_KEY"),

                model: non_empty("GEMINI_MODEL")
                    .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),

                base_url: non_empty("GEMINI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),

                timeout: non_empty("SUMMARY_TIMEOUT_SECS")
                    .map(|v| {
                        v.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                            ConfigError::InvalidValue("SUMMARY_TIMEOUT_SECS".to_string())
                        })
                    })
                    .transpose()?,
            },
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "TILL_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the listener binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// `<data dir>/till.db`, e.g. `~/.local/share/till-counter/till.db` on Linux.
fn default_database_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("com", "till", "till-counter")
        .map(|dirs| dirs.data_dir().join("till.db"))
        .ok_or_else(|| ConfigError::MissingRequired("TILL_DB_PATH".to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0} (no home directory to default to)")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("TILL_DB_PATH", "/tmp/till.db")]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/till.db"));
        assert_eq!(config.db_max_connections, 5);
        assert!(config.summary.api_key.is_none());
        assert_eq!(config.summary.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.summary.base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(config.summary.timeout.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("TILL_DB_PATH", "/srv/till.db"),
            ("TILL_BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("TILL_DB_MAX_CONNECTIONS", "2"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1/"),
            ("SUMMARY_TIMEOUT_SECS", "15"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.summary.api_key.as_deref(), Some("secret"));
        assert_eq!(config.summary.model, "gemini-2.0-flash");
        assert_eq!(config.summary.base_url, "http://localhost:9999/v1");
        assert_eq!(config.summary.timeout, Some(Duration::from_secs(15)));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("TILL_DB_PATH", "x.db"), ("PORT", "not-a-port")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for PORT");

        let err = load(&[("TILL_DB_PATH", "x.db"), ("TILL_DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref k) if k == "TILL_DB_MAX_CONNECTIONS"));

        assert!(load(&[("TILL_DB_PATH", "x.db"), ("SUMMARY_TIMEOUT_SECS", "-1")]).is_err());
    }

    #[test]
    fn test_blank_key_disables_summaries() {
        let config = load(&[("TILL_DB_PATH", "x.db"), ("GEMINI_API_KEY", "  ")]).unwrap();
        assert!(config.summary.api_key.is_none());
    }
}
