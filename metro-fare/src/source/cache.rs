//! Disk-based cache for the network description.

use std::path::Path;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::network::NetworkDescription;

use super::config::{DataSource, NetworkCacheConfig};
use super::error::SourceError;

/// Cached description with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedNetwork {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// Source the description was fetched from.
    source: String,
    /// The cached description.
    description: NetworkDescription,
}

/// Disk cache for the network description.
#[derive(Debug, Clone)]
pub struct NetworkCache {
    config: NetworkCacheConfig,
}

impl NetworkCache {
    /// Create a new network cache with the given config.
    pub fn new(config: NetworkCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load the description cached for `source`.
    ///
    /// Returns `None` if the cache doesn't exist, is invalid, has expired,
    /// or was written for a different source.
    pub fn load(&self, source: &DataSource) -> Option<NetworkDescription> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedNetwork = serde_json::from_str(&contents).ok()?;

        if cached.source != source.to_string() {
            return None;
        }

        let age_secs = unix_now().ok()?.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.description)
    }

    /// Save a description fetched from `source`.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(
        &self,
        source: &DataSource,
        description: &NetworkDescription,
    ) -> Result<(), SourceError> {
        let cached = CachedNetwork {
            cached_at_secs: unix_now()?,
            source: source.to_string(),
            description: description.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| SourceError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| SourceError::Cache {
            message: format!("failed to serialize cache: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| SourceError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    /// Get the cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Get the cache TTL.
    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}

fn unix_now() -> Result<u64, SourceError> {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|_| SourceError::Cache {
            message: "system time before unix epoch".to_string(),
        })
}
