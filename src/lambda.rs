use foodtems::adapters::api_gateway::{request_body, ProxyResponse};
use foodtems::core::Storage;
use foodtems::utils::logger;
use foodtems::{
    CatalogLoader, CheckIngredientsHandler, HttpBlobStorage, HttpResponse, LambdaConfig,
    LocalStorage, S3Storage, StorageBackend, StorageConfig,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// Leaves room to serialize and return the response before the runtime kills us.
const DEADLINE_MARGIN: Duration = Duration::from_millis(250);

fn time_left(deadline_ms: u64) -> Duration {
    let deadline = UNIX_EPOCH + Duration::from_millis(deadline_ms);
    deadline
        .duration_since(SystemTime::now())
        .unwrap_or_default()
        .saturating_sub(DEADLINE_MARGIN)
}

async fn respond<S, F>(storage: S, config: StorageConfig, body: &[u8], cancel: F) -> HttpResponse
where
    S: Storage,
    F: Future<Output = ()>,
{
    CheckIngredientsHandler::new(CatalogLoader::new(storage, config))
        .handle_with_cancel(body, cancel)
        .await
}

async fn function_handler(event: LambdaEvent<Value>) -> Result<ProxyResponse, Error> {
    let (payload, context) = event.into_parts();
    tracing::info!("Starting ingredient check for request {}", context.request_id);

    let body = match request_body(&payload) {
        Ok(body) => body,
        Err(e) => return Ok(HttpResponse::from_error(&e).into()),
    };

    // 每次調用都重新讀取配置
    let config = match LambdaConfig::from_env() {
        Ok(config) => config.storage,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            return Ok(HttpResponse::from_error(&e).into());
        }
    };

    let cancel = tokio::time::sleep(time_left(context.deadline));
    let response = match config.backend {
        StorageBackend::S3 => {
            let storage = S3Storage::connect(&config.connection).await;
            respond(storage, config, &body, cancel).await
        }
        StorageBackend::Http => {
            let storage = HttpBlobStorage::new(config.connection.clone());
            respond(storage, config, &body, cancel).await
        }
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.connection.clone());
            respond(storage, config, &body, cancel).await
        }
    };

    tracing::info!("Ingredient check finished with status {}", response.status);
    Ok(response.into())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
