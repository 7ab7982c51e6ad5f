use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoodtemsError {
    #[error("Bad request: {message}")]
    BadRequestError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage unavailable: {message}")]
    StorageUnavailableError { message: String },

    #[error("Malformed catalog document: {message}")]
    MalformedDocumentError { message: String },

    #[error("Malformed catalog item at index {index}: {message}")]
    MalformedItemError { index: usize, message: String },

    #[error("Request cancelled before the catalog was loaded")]
    CancelledError,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Configuration,
    Storage,
    Catalog,
    Cancelled,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Request => "bad_request",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Storage => "storage_unavailable",
            ErrorCategory::Catalog => "malformed_catalog",
            ErrorCategory::Cancelled => "cancelled",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl FoodtemsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FoodtemsError::BadRequestError { .. } => ErrorCategory::Request,
            FoodtemsError::ConfigError { .. }
            | FoodtemsError::MissingConfigError { .. }
            | FoodtemsError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            FoodtemsError::StorageUnavailableError { .. } => ErrorCategory::Storage,
            FoodtemsError::MalformedDocumentError { .. }
            | FoodtemsError::MalformedItemError { .. } => ErrorCategory::Catalog,
            FoodtemsError::CancelledError => ErrorCategory::Cancelled,
            FoodtemsError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// HTTP status reported to the caller for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Request => 400,
            ErrorCategory::Configuration => 500,
            ErrorCategory::Storage => 502,
            ErrorCategory::Catalog => 502,
            ErrorCategory::Cancelled => 504,
            ErrorCategory::Internal => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FoodtemsError::BadRequestError { message } => {
                format!("The request body is invalid: {}", message)
            }
            FoodtemsError::ConfigError { message } => {
                format!("The service is misconfigured: {}", message)
            }
            FoodtemsError::MissingConfigError { field } => {
                format!("The service is misconfigured: {} is not set", field)
            }
            FoodtemsError::InvalidConfigValueError { field, reason, .. } => {
                format!("The service is misconfigured: {} {}", field, reason)
            }
            FoodtemsError::StorageUnavailableError { message } => {
                format!("The catalog could not be retrieved: {}", message)
            }
            FoodtemsError::MalformedDocumentError { message } => {
                format!("The catalog document is malformed: {}", message)
            }
            FoodtemsError::MalformedItemError { index, message } => {
                format!("Catalog item #{} is malformed: {}", index, message)
            }
            FoodtemsError::CancelledError => {
                "The request was cancelled before it completed".to_string()
            }
            FoodtemsError::SerializationError(e) => {
                format!("The response could not be produced: {}", e)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Request => {
                "Send a JSON body of the form {\"restrictedIngredients\": [\"...\"]}"
            }
            ErrorCategory::Configuration => {
                "Check the storage connection, container and blob settings"
            }
            ErrorCategory::Storage => "Verify the blob exists and the storage backend is reachable",
            ErrorCategory::Catalog => {
                "Fix the catalog document so every item has batters and topping groups"
            }
            ErrorCategory::Cancelled => "Retry the request with a longer deadline",
            ErrorCategory::Internal => "Report this failure to the service owner",
        }
    }
}

pub type Result<T> = std::result::Result<T, FoodtemsError>;
