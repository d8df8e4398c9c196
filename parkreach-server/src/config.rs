use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// City used when a request does not name one
    pub default_city: String,
    pub default_threshold_m: f64,
    pub request_timeout_secs: u64,
    pub concurrency_limit: usize,
    /// City name to park polygons GeoJSON (WGS84)
    pub cities: HashMap<String, PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8000)),
            default_city: "Amsterdam".to_string(),
            default_threshold_m: 500.0,
            request_timeout_secs: 30,
            concurrency_limit: 256,
            cities: HashMap::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, std::io::Error),
    #[error("Invalid config {}: {}", .0.display(), .1)]
    Parse(PathBuf, toml::de::Error),
}

impl ServerConfig {
    /// Reads the config from a TOML file. City paths are taken relative to
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let mut config: ServerConfig =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            for parks in config.cities.values_mut() {
                if parks.is_relative() {
                    *parks = base.join(&*parks);
                }
            }
        }
        Ok(config)
    }
}
