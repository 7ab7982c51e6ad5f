pub mod cli;
pub mod http;
pub mod lambda;
pub mod toml_config;

use crate::utils::error::{FoodtemsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Blobs are files under `<connection>/<container>/`.
    Local,
    /// Blobs are served at `<connection>/<container>/<blob>`.
    Http,
    /// Container is the bucket; connection is a region or endpoint URL.
    S3,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageBackend::Local => "local",
            StorageBackend::Http => "http",
            StorageBackend::S3 => "s3",
        };
        f.write_str(name)
    }
}

impl FromStr for StorageBackend {
    type Err = FoodtemsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "file" => Ok(StorageBackend::Local),
            "http" | "https" => Ok(StorageBackend::Http),
            "s3" => Ok(StorageBackend::S3),
            other => Err(FoodtemsError::InvalidConfigValueError {
                field: "backend".to_string(),
                value: other.to_string(),
                reason: "expected one of local, http, s3".to_string(),
            }),
        }
    }
}

/// Where the catalog blob lives. Passed to the loader explicitly so callers
/// decide where the values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub connection: String,
    pub container: String,
    pub blob: String,
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("connection", &self.connection)?;
        validate_non_empty_string("container", &self.container)?;
        validate_non_empty_string("blob", &self.blob)?;

        match self.backend {
            StorageBackend::Local => validate_path("connection", &self.connection),
            StorageBackend::Http => validate_url("connection", &self.connection),
            StorageBackend::S3 => Ok(()),
        }
    }
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;
