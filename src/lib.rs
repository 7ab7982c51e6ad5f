pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

#[cfg(feature = "lambda")]
pub use config::lambda::S3Storage;

pub use config::cli::LocalStorage;
pub use config::http::HttpBlobStorage;
pub use config::lambda::LambdaConfig;
pub use config::{StorageBackend, StorageConfig};
pub use crate::core::{
    handler::{CheckIngredientsHandler, HttpResponse},
    loader::CatalogLoader,
};
pub use utils::error::{FoodtemsError, Result};
