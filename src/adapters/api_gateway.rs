use crate::core::handler::HttpResponse;
use crate::utils::error::{FoodtemsError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest {
    body: Option<String>,
    #[serde(default)]
    is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<HttpResponse> for ProxyResponse {
    fn from(response: HttpResponse) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code: response.status,
            headers,
            body: response.body,
        }
    }
}

fn is_proxy_event(event: &Value) -> bool {
    ["requestContext", "httpMethod", "routeKey", "body"]
        .iter()
        .any(|key| event.get(key).is_some())
}

/// Extracts the request body from an API Gateway proxy event. Any other
/// event is taken to be the request itself (direct invocation).
pub fn request_body(event: &Value) -> Result<Vec<u8>> {
    if !is_proxy_event(event) {
        return Ok(serde_json::to_vec(event)?);
    }

    let request =
        ProxyRequest::deserialize(event).map_err(|e| FoodtemsError::BadRequestError {
            message: format!("unrecognised proxy event: {}", e),
        })?;
    if request.is_base64_encoded {
        return Err(FoodtemsError::BadRequestError {
            message: "base64-encoded bodies are not supported".to_string(),
        });
    }

    request
        .body
        .map(String::into_bytes)
        .ok_or_else(|| FoodtemsError::BadRequestError {
            message: "request body is empty".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_proxy_event_body_is_extracted() {
        let event = json!({
            "httpMethod": "POST",
            "body": "{\"restrictedIngredients\":[\"Glazed\"]}",
            "isBase64Encoded": false
        });
        let body = request_body(&event).unwrap();
        assert_eq!(body, br#"{"restrictedIngredients":["Glazed"]}"#.to_vec());
    }

    #[test]
    fn test_direct_invocation_passes_event_through() {
        let event = json!({ "restrictedIngredients": ["Glazed"] });
        let body = request_body(&event).unwrap();
        let decoded: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_proxy_event_without_body_is_bad_request() {
        let event = json!({ "httpMethod": "POST", "body": null });
        let err = request_body(&event).unwrap_err();
        assert_eq!(err.status_code(), 400);

        let event = json!({ "httpMethod": "POST", "body": "e30=", "isBase64Encoded": true });
        assert!(matches!(
            request_body(&event),
            Err(FoodtemsError::BadRequestError { .. })
        ));
    }

    #[test]
    fn test_proxy_response_shape() {
        let response = ProxyResponse::from(HttpResponse {
            status: 502,
            body: "{}".to_string(),
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["statusCode"], json!(502));
        assert_eq!(value["headers"]["Content-Type"], json!("application/json"));
    }
}
