//! Catalog configuration.
//!
//! Configuration is optional JSON; every key falls back to its default:
//!
//! ```json
//! { "capacity": 5, "dump_path": "catalog.txt" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::store::DEFAULT_CAPACITY;

/// Default location of the text dump, relative to the working directory.
pub const DEFAULT_DUMP_PATH: &str = "catalog.txt";

/// Settings for a catalog session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Maximum number of records the store holds.
    pub capacity: usize,
    /// File used by save, load and restore.
    pub dump_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            dump_path: PathBuf::from(DEFAULT_DUMP_PATH),
        }
    }
}

impl CatalogConfig {
    /// Reads and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Read`] if the file cannot be read
    /// - [`ConfigError::Parse`] if it is not valid JSON for this type
    /// - [`ConfigError::InvalidCapacity`] if the capacity is zero
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let data = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a usable store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if the capacity is zero.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            warn!(capacity = self.capacity, "rejected catalog config");
            return Err(ConfigError::InvalidCapacity {
                capacity: self.capacity,
            }
            .into());
        }
        Ok(())
    }
}
