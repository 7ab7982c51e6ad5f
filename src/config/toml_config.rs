use crate::config::StorageBackend;
use crate::utils::error::{FoodtemsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file for the CLI:
///
/// ```toml
/// [storage]
/// backend = "local"
/// connection = "./data"
/// container = "menus"
/// blob = "catalog.json"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub backend: Option<StorageBackend>,
    pub connection: Option<String>,
    pub container: Option<String>,
    pub blob: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| FoodtemsError::ConfigError {
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FoodtemsError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_storage_section() {
        let config = FileConfig::from_toml_str(
            r#"
[storage]
backend = "http"
connection = "http://localhost:9000"
container = "menus"
blob = "catalog.json"
"#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, Some(StorageBackend::Http));
        assert_eq!(config.storage.container.as_deref(), Some("menus"));
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.storage.connection.is_none());
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let err = FileConfig::from_toml_str("[storage]\nbackend = \"azure\"\n").unwrap_err();
        assert!(matches!(err, FoodtemsError::ConfigError { .. }));
    }
}
