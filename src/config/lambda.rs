use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::{FoodtemsError, Result};
use std::env;

pub const CONNECTION_VAR: &str = "STORAGE_CONNECTION";
pub const CONTAINER_VAR: &str = "CONTAINER_NAME";
pub const BLOB_VAR: &str = "BLOB_NAME";
pub const BACKEND_VAR: &str = "STORAGE_BACKEND";

// Names used by existing Functions-style deployments.
const LEGACY_CONNECTION_VAR: &str = "AzureWebJobsStorage";
const LEGACY_CONTAINER_VAR: &str = "ContainerName";
const LEGACY_BLOB_VAR: &str = "BlobName";

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub storage: StorageConfig,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |primary: &str, legacy: &str| {
            lookup(primary)
                .or_else(|| lookup(legacy))
                .ok_or_else(|| FoodtemsError::MissingConfigError {
                    field: primary.to_string(),
                })
        };

        let backend = match lookup(BACKEND_VAR) {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        Ok(Self {
            storage: StorageConfig {
                backend,
                connection: required(CONNECTION_VAR, LEGACY_CONNECTION_VAR)?,
                container: required(CONTAINER_VAR, LEGACY_CONTAINER_VAR)?,
                blob: required(BLOB_VAR, LEGACY_BLOB_VAR)?,
            },
        })
    }
}

#[cfg(feature = "lambda")]
pub use self::s3::S3Storage;

#[cfg(feature = "lambda")]
mod s3 {
    use crate::core::Storage;
    use crate::utils::error::{FoodtemsError, Result};
    use aws_config::BehaviorVersion;
    use aws_sdk_s3::config::Region;
    use aws_sdk_s3::error::DisplayErrorContext;
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::Client as S3Client;

    #[derive(Debug, Clone)]
    pub struct S3Storage {
        client: S3Client,
    }

    impl S3Storage {
        pub fn new(client: S3Client) -> Self {
            Self { client }
        }

        /// `connection` is a region name, or an endpoint URL for
        /// S3-compatible stores.
        pub async fn connect(connection: &str) -> Self {
            let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
            let builder = aws_sdk_s3::config::Builder::from(&shared);
            let builder = if connection.starts_with("http://") || connection.starts_with("https://")
            {
                builder.endpoint_url(connection).force_path_style(true)
            } else {
                builder.region(Region::new(connection.to_string()))
            };
            Self::new(S3Client::from_conf(builder.build()))
        }
    }

    impl Storage for S3Storage {
        async fn read_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>> {
            let resp = self
                .client
                .get_object()
                .bucket(container)
                .key(blob)
                .send()
                .await
                .map_err(|e| {
                    let message = match e.as_service_error() {
                        Some(GetObjectError::NoSuchKey(_)) => {
                            format!("s3://{}/{} does not exist", container, blob)
                        }
                        _ => format!(
                            "Failed to read s3://{}/{}: {}",
                            container,
                            blob,
                            DisplayErrorContext(&e)
                        ),
                    };
                    FoodtemsError::StorageUnavailableError { message }
                })?;

            let data = resp
                .body
                .collect()
                .await
                .map_err(|e| FoodtemsError::StorageUnavailableError {
                    message: format!("Failed to collect S3 data: {}", e),
                })?;

            Ok(data.into_bytes().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults_to_s3() {
        let config = LambdaConfig::from_lookup(lookup(&[
            (CONNECTION_VAR, "ap-southeast-2"),
            (CONTAINER_VAR, "menus"),
            (BLOB_VAR, "catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.connection, "ap-southeast-2");
    }

    #[test]
    fn test_from_lookup_accepts_legacy_names() {
        let config = LambdaConfig::from_lookup(lookup(&[
            (BACKEND_VAR, "http"),
            ("AzureWebJobsStorage", "http://localhost:10000/devstoreaccount1"),
            ("ContainerName", "menus"),
            ("BlobName", "catalog.json"),
        ]))
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Http);
        assert_eq!(config.storage.container, "menus");
    }

    #[test]
    fn test_from_lookup_missing_blob() {
        let err = LambdaConfig::from_lookup(lookup(&[
            (CONNECTION_VAR, "ap-southeast-2"),
            (CONTAINER_VAR, "menus"),
        ]))
        .unwrap_err();

        assert!(matches!(err, FoodtemsError::MissingConfigError { ref field } if field == BLOB_VAR));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_backend() {
        let err = LambdaConfig::from_lookup(lookup(&[(BACKEND_VAR, "ftp")])).unwrap_err();
        assert!(matches!(err, FoodtemsError::InvalidConfigValueError { .. }));
    }
}
