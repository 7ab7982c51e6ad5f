use crate::config::StorageConfig;
use crate::core::{CatalogDocument, Storage};
use crate::utils::error::{FoodtemsError, Result};
use crate::utils::validation::Validate;
use std::future::Future;

/// Fetches and parses the catalog blob named by a [`StorageConfig`].
pub struct CatalogLoader<S: Storage> {
    storage: S,
    config: StorageConfig,
}

impl<S: Storage> CatalogLoader<S> {
    pub fn new(storage: S, config: StorageConfig) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub async fn load(&self) -> Result<CatalogDocument> {
        self.config.validate()?;

        tracing::debug!(
            "Reading catalog blob {}/{} via {}",
            self.config.container,
            self.config.blob,
            self.config.backend
        );
        let bytes = self
            .storage
            .read_blob(&self.config.container, &self.config.blob)
            .await?;
        tracing::debug!("Catalog blob is {} bytes", bytes.len());

        CatalogDocument::from_slice(&bytes)
    }

    /// Like [`load`](Self::load), but gives up as soon as `cancel` resolves.
    /// The in-flight read is dropped.
    pub async fn load_with_cancel<F>(&self, cancel: F) -> Result<CatalogDocument>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => {
                tracing::warn!("Catalog read cancelled");
                Err(FoodtemsError::CancelledError)
            }
            document = self.load() => document,
        }
    }
}
