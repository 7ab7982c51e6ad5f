use crate::core::Storage;
use crate::utils::error::{FoodtemsError, Result};
use reqwest::Client;
use url::Url;

/// Blob store reachable over plain HTTP GET, e.g. a public bucket or a
/// storage emulator.
#[derive(Debug, Clone)]
pub struct HttpBlobStorage {
    client: Client,
    base_url: String,
}

impl HttpBlobStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `<base>/<container>/<blob>`; slashes inside the blob name are kept as
    /// path separators.
    pub fn blob_url(&self, container: &str, blob: &str) -> Result<Url> {
        let invalid = |reason: String| FoodtemsError::InvalidConfigValueError {
            field: "connection".to_string(),
            value: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(container)
            .extend(blob.split('/'));
        Ok(url)
    }
}

impl Storage for HttpBlobStorage {
    async fn read_blob(&self, container: &str, blob: &str) -> Result<Vec<u8>> {
        let url = self.blob_url(container, blob)?;
        tracing::debug!("Making blob request to: {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            FoodtemsError::StorageUnavailableError {
                message: format!("GET {} failed: {}", url, e),
            }
        })?;

        let status = response.status();
        tracing::debug!("Blob response status: {}", status);
        if !status.is_success() {
            return Err(FoodtemsError::StorageUnavailableError {
                message: format!("GET {} returned {}", url, status),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FoodtemsError::StorageUnavailableError {
                message: format!("Failed to read body of {}: {}", url, e),
            })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_url_joins_segments() {
        let storage = HttpBlobStorage::new("http://localhost:9000/store/");
        let url = storage.blob_url("menus", "2024/catalog.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/store/menus/2024/catalog.json");

        let storage = HttpBlobStorage::new("http://localhost:9000");
        let url = storage.blob_url("menus", "catalog.json").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/menus/catalog.json");
    }

    #[test]
    fn test_blob_url_rejects_bad_base() {
        let storage = HttpBlobStorage::new("not a url");
        assert!(matches!(
            storage.blob_url("menus", "catalog.json"),
            Err(FoodtemsError::InvalidConfigValueError { .. })
        ));
    }
}
