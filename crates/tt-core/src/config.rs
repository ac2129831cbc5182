//! Configuration types and parsing for tabletrace.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tt_sql::Dialect;

/// Config file names searched for in a directory, in order
const CONFIG_FILE_NAMES: [&str; 2] = ["tabletrace.yml", "tabletrace.yaml"];

const DEFAULT_HOST: &str = "127.0.0.1";

const DEFAULT_PORT: u16 = 8000;

/// 1 MiB of SQL text per request
const DEFAULT_MAX_SQL_BYTES: usize = 1024 * 1024;

/// Main configuration from tabletrace.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dialect applied when a request or command does not name one
    #[serde(default)]
    pub dialect: Dialect,

    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// HTTP service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind
    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on the SQL text accepted per request, in bytes
    #[serde(default = "default_max_sql_bytes")]
    pub max_sql_bytes: usize,

    /// Origins allowed to call the service from a browser.
    /// Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_max_sql_bytes() -> usize {
    DEFAULT_MAX_SQL_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: Dialect::DEFAULT,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_sql_bytes: default_max_sql_bytes(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_yaml(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Find the config file in a directory.
    /// Looks for tabletrace.yml or tabletrace.yaml
    pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist. Without one, the config file in `dir` is
    /// used when present, and the defaults otherwise.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> CoreResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!(
                    "No config file in {}, using defaults",
                    dir.display()
                );
                Ok(Self::default())
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "server.host cannot be empty".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "server.port must be non-zero".to_string(),
            });
        }
        if self.server.max_sql_bytes == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "server.max_sql_bytes must be non-zero".to_string(),
            });
        }
        if let Some(origin) = self.server.cors_origins.iter().find(|o| o.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: format!("server.cors_origins contains an empty origin: {:?}", origin),
            });
        }
        Ok(())
    }
}

impl ServerConfig {
    /// Socket address to bind
    pub fn socket_addr(&self) -> CoreResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| CoreError::ConfigInvalid {
                message: format!("invalid server address {}:{}", self.host, self.port),
            })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
