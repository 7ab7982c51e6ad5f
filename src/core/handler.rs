use crate::core::classifier::classify;
use crate::core::loader::CatalogLoader;
use crate::core::{ClassifiedItem, RestrictedRequest, Storage};
use crate::utils::error::{FoodtemsError, Result};
use std::future::Future;

/// Status code and JSON body handed back to whatever is hosting the handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    pub fn from_error(error: &FoodtemsError) -> Self {
        let body = serde_json::json!({
            "error": error.category().as_str(),
            "message": error.user_friendly_message(),
        });
        Self {
            status: error.status_code(),
            body: body.to_string(),
        }
    }
}

pub struct CheckIngredientsHandler<S: Storage> {
    loader: CatalogLoader<S>,
}

impl<S: Storage> CheckIngredientsHandler<S> {
    pub fn new(loader: CatalogLoader<S>) -> Self {
        Self { loader }
    }

    pub async fn check(&self, body: &[u8]) -> Result<Vec<ClassifiedItem>> {
        self.check_with_cancel(body, std::future::pending()).await
    }

    /// Decodes the request, loads the catalog and classifies it. The body is
    /// decoded first so a bad request never touches storage.
    pub async fn check_with_cancel<F>(&self, body: &[u8], cancel: F) -> Result<Vec<ClassifiedItem>>
    where
        F: Future<Output = ()>,
    {
        let request = RestrictedRequest::from_slice(body)?;
        tracing::debug!(
            "Checking {} restricted ingredients",
            request.restricted_ingredients.len()
        );

        let document = self.loader.load_with_cancel(cancel).await?;
        classify(&document, &request.restricted_ingredients)
    }

    pub async fn handle(&self, body: &[u8]) -> HttpResponse {
        self.handle_with_cancel(body, std::future::pending()).await
    }

    pub async fn handle_with_cancel<F>(&self, body: &[u8], cancel: F) -> HttpResponse
    where
        F: Future<Output = ()>,
    {
        tracing::info!("Processing ingredient check request");

        let outcome = self
            .check_with_cancel(body, cancel)
            .await
            .and_then(|items| {
                let count = items.len();
                Ok((count, serde_json::to_string(&items)?))
            });

        match outcome {
            Ok((count, body)) => {
                tracing::info!("Ingredient check completed: {} items classified", count);
                HttpResponse::ok(body)
            }
            Err(e) => {
                let response = HttpResponse::from_error(&e);
                tracing::error!(
                    "Ingredient check failed with status {} ({}): {}",
                    response.status,
                    e.category().as_str(),
                    e
                );
                tracing::debug!("Recovery suggestion: {}", e.recovery_suggestion());
                response
            }
        }
    }
}
