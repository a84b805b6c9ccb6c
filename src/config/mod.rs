//! Server configuration and the selector catalogs built from it.
//!
//! [`ServerConfig`] is plain data with a default for every field, so an empty
//! TOML file (or none at all) yields the stock catalog:
//!
//! ```toml
//! port = 8888
//! route = "/ws"
//!
//! [speeds]
//! "1" = 10
//! "2" = 100
//! "3" = 600
//!
//! [dataset]
//! delimiter = ";"
//!
//! [dataset.files]
//! f = "input/fr.csv"
//! i = "input/isere.csv"
//! p = "input/small.csv"
//!
//! [dataset.reference]
//! name = "Grenoble"
//! latitude = 45.166667
//! longitude = 5.716667
//! ```

mod catalog;

pub use catalog::{Catalog, ResolvedRequest};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dataset::ReferencePoint;
use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Path the WebSocket upgrade is served on.
    pub route: String,
    /// Requests buffered per connection while a session is streaming.
    pub request_queue_depth: usize,
    /// Speed tier id -> pacing interval in milliseconds.
    pub speeds: BTreeMap<String, u64>,
    pub dataset: DatasetConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8888,
            route: "/ws".to_string(),
            request_queue_depth: 8,
            speeds: BTreeMap::from([
                ("1".to_string(), 10),
                ("2".to_string(), 100),
                ("3".to_string(), 600),
            ]),
            dataset: DatasetConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Dataset id -> delimited file.
    pub files: BTreeMap<String, PathBuf>,
    pub delimiter: char,
    pub latitude_column: String,
    pub longitude_column: String,
    /// Point every distance is measured from.
    pub reference: ReferencePoint,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            files: BTreeMap::from([
                ("f".to_string(), PathBuf::from("input/fr.csv")),
                ("i".to_string(), PathBuf::from("input/isere.csv")),
                ("p".to_string(), PathBuf::from("input/small.csv")),
            ]),
            delimiter: ';',
            latitude_column: "latitude".to_string(),
            longitude_column: "longitude".to_string(),
            reference: ReferencePoint::default(),
        }
    }
}

impl ServerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.route.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "route must start with '/': {}",
                self.route
            )));
        }
        if self.request_queue_depth == 0 {
            return Err(ConfigError::Invalid(
                "request_queue_depth must be at least 1".to_string(),
            ));
        }
        if self.speeds.is_empty() {
            return Err(ConfigError::Invalid("no speed tiers configured".to_string()));
        }
        if self.dataset.files.is_empty() {
            return Err(ConfigError::Invalid("no datasets configured".to_string()));
        }
        if !self.dataset.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be ASCII: {:?}",
                self.dataset.delimiter
            )));
        }
        Ok(())
    }

    /// `host:port` string for binding.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
