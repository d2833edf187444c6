//! Application configuration
//!
//! Loaded from a JSON file; every field has a default, so an empty object
//! (or no file at all) yields a working in-memory setup on port 9980.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Document store connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store endpoint, `mem://` or `file://<dir>` (default: "mem://")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bucket holding the catalog documents (default: "beer-sample")
    #[serde(default = "default_bucket")]
    pub bucket: String,
}

fn default_endpoint() -> String {
    "mem://".to_string()
}

fn default_bucket() -> String {
    "beer-sample".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            bucket: default_bucket(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 9980)
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Directory of page templates; embedded templates when unset
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Directory holding `css/` and `js/` (default: "static")
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9980
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreConfig::default(),
            catalog: CatalogConfig::default(),
            template_dir: None,
            static_dir: default_static_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        Self::from_json(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::Invalid("catalog.page_size must be > 0".into()));
        }
        if self.store.bucket.is_empty() {
            return Err(ConfigError::Invalid("store.bucket must not be empty".into()));
        }
        if self.store.endpoint.is_empty() {
            return Err(ConfigError::Invalid("store.endpoint must not be empty".into()));
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Freshness;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:9980");
        assert_eq!(config.store.endpoint, "mem://");
        assert_eq!(config.store.bucket, "beer-sample");
        assert_eq!(config.catalog.page_size, 30);
        assert!(config.template_dir.is_none());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(AppConfig::from_json("{}").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_nested_overrides() {
        let config = AppConfig::from_json(
            r#"{
                "port": 8091,
                "store": { "endpoint": "file:///var/lib/beersample" },
                "catalog": { "brewery_freshness": "ok" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.port, 8091);
        assert_eq!(config.store.endpoint, "file:///var/lib/beersample");
        assert_eq!(config.store.bucket, "beer-sample");
        assert_eq!(config.catalog.brewery_freshness, Freshness::Ok);
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = AppConfig::from_json(r#"{ "catalog": { "page_size": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            AppConfig::from_json("{ port: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("beersample.json");
        fs::write(&path, r#"{ "host": "127.0.0.1" }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:9980");
    }
}
