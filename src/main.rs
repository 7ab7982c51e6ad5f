use clap::Parser;
use foodtems::core::ClassifiedItem;
use foodtems::utils::error::{ErrorCategory, FoodtemsError};
use foodtems::utils::logger;
use foodtems::{
    CatalogLoader, CheckIngredientsHandler, CliConfig, HttpBlobStorage, LocalStorage,
    StorageBackend, StorageConfig,
};

async fn run(config: &CliConfig) -> Result<Vec<ClassifiedItem>, FoodtemsError> {
    let storage_config = config.storage_config()?;
    let body = config.request_body()?;
    tracing::debug!("Storage config: {:?}", storage_config);

    match storage_config.backend {
        StorageBackend::Local => {
            let storage = LocalStorage::new(storage_config.connection.clone());
            check(storage, storage_config, &body).await
        }
        StorageBackend::Http => {
            let storage = HttpBlobStorage::new(storage_config.connection.clone());
            check(storage, storage_config, &body).await
        }
        #[cfg(feature = "lambda")]
        StorageBackend::S3 => {
            let storage = foodtems::S3Storage::connect(&storage_config.connection).await;
            check(storage, storage_config, &body).await
        }
        #[cfg(not(feature = "lambda"))]
        StorageBackend::S3 => Err(FoodtemsError::ConfigError {
            message: "the s3 backend requires building with the `lambda` feature".to_string(),
        }),
    }
}

async fn check<S: foodtems::core::Storage>(
    storage: S,
    config: StorageConfig,
    body: &[u8],
) -> Result<Vec<ClassifiedItem>, FoodtemsError> {
    let handler = CheckIngredientsHandler::new(CatalogLoader::new(storage, config));
    handler.check(body).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting foodtems CLI");

    match run(&config).await {
        Ok(items) => {
            tracing::info!("✅ Classified {} items", items.len());
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Ingredient check failed: {} (Category: {:?}, Status: {})",
                e,
                e.category(),
                e.status_code()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.category() {
                ErrorCategory::Request => 2,
                ErrorCategory::Configuration => 3,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
