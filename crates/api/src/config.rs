//! API configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use wms_inventory::InventorySeed;
use wms_observability::LogFormat;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Socket the HTTP server listens on (`WMS_BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Optional JSON inventory seed loaded at startup (`WMS_INVENTORY_SEED`).
    pub inventory_seed: Option<PathBuf>,

    /// Log output format (`WMS_LOG_FORMAT`: `json` or `pretty`).
    pub log_format: LogFormat,
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = get("WMS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("WMS_BIND_ADDR".to_string()))?;

        let inventory_seed = get("WMS_INVENTORY_SEED")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match get("WMS_LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WMS_LOG_FORMAT".to_string()))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            inventory_seed,
            log_format,
        })
    }

    /// Read and parse the configured seed file, if any.
    pub fn load_seed(&self) -> Result<Option<InventorySeed>, ConfigError> {
        let Some(path) = &self.inventory_seed else {
            return Ok(None);
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
            path: path.clone(),
            source,
        })?;
        let seed = serde_json::from_str(&raw).map_err(|source| ConfigError::SeedParse {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "inventory seed loaded");
        Ok(Some(seed))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),

    #[error("cannot read inventory seed {}: {source}", .path.display())]
    SeedRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid inventory seed {}: {source}", .path.display())]
    SeedParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
