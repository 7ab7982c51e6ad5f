use crate::core::Storage;
use crate::utils::error::{FoodtemsError, Result};
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(container).join(blob);

        tokio::fs::read(&full_path).await.map_err(|e| {
            let message = match e.kind() {
                ErrorKind::NotFound => format!("{} does not exist", full_path.display()),
                _ => format!("Failed to read {}: {}", full_path.display(), e),
            };
            FoodtemsError::StorageUnavailableError { message }
        })
    }
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::config::toml_config::{FileConfig, StorageSection};
    use crate::config::{StorageBackend, StorageConfig};
    use crate::core::RestrictedRequest;
    use crate::utils::error::{FoodtemsError, Result};
    use crate::utils::validation::validate_required_field;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "foodtems")]
    #[command(about = "Flag catalog items that contain every restricted ingredient")]
    pub struct CliConfig {
        #[arg(long, value_delimiter = ',', help = "Restricted ingredient names")]
        pub restricted: Vec<String>,

        #[arg(long, help = "Read the JSON request body from a file instead of --restricted")]
        pub request: Option<PathBuf>,

        #[arg(long, help = "TOML file with a [storage] table")]
        pub config: Option<PathBuf>,

        #[arg(long, value_enum)]
        pub backend: Option<StorageBackend>,

        #[arg(long, help = "Base directory or base URL of the blob store")]
        pub connection: Option<String>,

        #[arg(long)]
        pub container: Option<String>,

        #[arg(long)]
        pub blob: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Flags take precedence over the settings file.
        pub fn storage_config(&self) -> Result<StorageConfig> {
            let file = match &self.config {
                Some(path) => FileConfig::from_file(path)?.storage,
                None => StorageSection::default(),
            };

            let connection = self.connection.clone().or(file.connection);
            let container = self.container.clone().or(file.container);
            let blob = self.blob.clone().or(file.blob);

            Ok(StorageConfig {
                backend: self.backend.or(file.backend).unwrap_or(StorageBackend::Local),
                connection: validate_required_field("connection", &connection)?.clone(),
                container: validate_required_field("container", &container)?.clone(),
                blob: validate_required_field("blob", &blob)?.clone(),
            })
        }

        pub fn request_body(&self) -> Result<Vec<u8>> {
            match &self.request {
                Some(path) => std::fs::read(path).map_err(|e| FoodtemsError::BadRequestError {
                    message: format!("cannot read {}: {}", path.display(), e),
                }),
                None => {
                    let request = RestrictedRequest {
                        restricted_ingredients: self.restricted.clone(),
                    };
                    Ok(serde_json::to_vec(&request)?)
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_flags_override_file() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("foodtems.toml");
            std::fs::write(
                &path,
                "[storage]\nbackend = \"http\"\nconnection = \"http://localhost:9000\"\ncontainer = \"menus\"\nblob = \"catalog.json\"\n",
            )
            .unwrap();

            let config = CliConfig::parse_from([
                "foodtems",
                "--config",
                path.to_str().unwrap(),
                "--blob",
                "winter.json",
            ]);
            let storage = config.storage_config().unwrap();

            assert_eq!(storage.backend, StorageBackend::Http);
            assert_eq!(storage.container, "menus");
            assert_eq!(storage.blob, "winter.json");
        }

        #[test]
        fn test_missing_connection_is_reported() {
            let config = CliConfig::parse_from(["foodtems", "--container", "menus", "--blob", "c.json"]);
            let err = config.storage_config().unwrap_err();
            assert!(matches!(err, FoodtemsError::MissingConfigError { ref field } if field == "connection"));
        }

        #[test]
        fn test_request_body_from_flags() {
            let config = CliConfig::parse_from(["foodtems", "--restricted", "Glazed,Sugar"]);
            let body = config.request_body().unwrap();
            let request = RestrictedRequest::from_slice(&body).unwrap();
            assert_eq!(request.restricted_ingredients, vec!["Glazed", "Sugar"]);
        }
    }
}
