//! Server and collector settings.
//!
//! Settings come from an optional TOML file with environment variable
//! overrides on top; every field has a sensible default so a bare
//! `keyviz-server` starts against a local cluster.

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Placement driver base URL (region statistics).
    #[serde(default = "default_pd_addr")]
    pub pd_addr: String,
    /// SQL layer base URL (schema metadata).
    #[serde(default = "default_tidb_addr")]
    pub tidb_addr: String,
    /// Maximum buckets per heatmap after squashing.
    #[serde(default = "default_max_buckets")]
    pub max_buckets: usize,
    /// Sampling interval in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Snapshot ring capacity.
    #[serde(default = "default_ring_capacity")]
    pub ring_capacity: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_pd_addr() -> String {
    "http://127.0.0.1:2379".to_string()
}

fn default_tidb_addr() -> String {
    "http://127.0.0.1:10080".to_string()
}

fn default_max_buckets() -> usize {
    256
}

fn default_interval_secs() -> u64 {
    60
}

fn default_ring_capacity() -> usize {
    1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            pd_addr: default_pd_addr(),
            tidb_addr: default_tidb_addr(),
            max_buckets: default_max_buckets(),
            interval_secs: default_interval_secs(),
            ring_capacity: default_ring_capacity(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing fields keep their
    /// defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve configuration: `KEYVIZ_CONFIG` file if set, then env
    /// overrides on top.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("KEYVIZ_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply `HOST`/`PORT`/`PD_ADDR`/`TIDB_ADDR`/`KEYVIZ_*` environment
    /// overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = env::var("HOST") {
            self.host = host;
        }
        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            self.port = port;
        }
        if let Ok(addr) = env::var("PD_ADDR") {
            self.pd_addr = addr;
        }
        if let Ok(addr) = env::var("TIDB_ADDR") {
            self.tidb_addr = addr;
        }
        if let Some(n) = env::var("KEYVIZ_MAX_BUCKETS").ok().and_then(|v| v.parse().ok()) {
            self.max_buckets = n;
        }
        if let Some(n) = env::var("KEYVIZ_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()) {
            self.interval_secs = n;
        }
        if let Some(n) = env::var("KEYVIZ_RING_CAPACITY").ok().and_then(|v| v.parse().ok()) {
            self.ring_capacity = n;
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs.max(1))
    }

    pub fn interval_chrono(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.interval_secs.max(1) as i64)
    }
}
