use thiserror::Error;

use crate::forecast::ErrorNumber;
use crate::llm::LlmError;

/// Errors related to forecast operations.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("{message} ({property})")]
    Validation {
        property: String,
        number: ErrorNumber,
        message: String,
    },

    #[error("forecast not found")]
    NotFound,

    #[error("simulated fault for forecast '{0}'")]
    SimulatedFault(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl ForecastError {
    /// A required value was absent, null, or blank.
    pub fn must_not_be_null(property: &str, message: &str) -> Self {
        ForecastError::Validation {
            property: property.to_string(),
            number: ErrorNumber::MustNotBeNull,
            message: message.to_string(),
        }
    }
}

impl From<RepositoryError> for ForecastError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound => ForecastError::NotFound,
            other => ForecastError::Storage(other.to_string()),
        }
    }
}

/// Errors from the key-phrase chat gateway.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Error calling AI model: {0}")]
    Upstream(#[from] LlmError),

    #[error("AI model returned null or empty response")]
    EmptyResponse,

    #[error("Failed to deserialize response from AI model")]
    InvalidResponse { detail: String },
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("AI settings validation failed: missing {}", .0.join(", "))]
    MissingAiSettings(Vec<String>),

    #[error("invalid setting {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors from store operations (used by trait definitions in lectern-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage failure: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ForecastError::must_not_be_null("Summary", "Input must not be null");
        assert_eq!(err.to_string(), "Input must not be null (Summary)");
    }

    #[test]
    fn test_repository_not_found_maps_to_forecast_not_found() {
        let err: ForecastError = RepositoryError::NotFound.into();
        assert!(matches!(err, ForecastError::NotFound));

        let err: ForecastError = RepositoryError::Conflict("dup".to_string()).into();
        assert!(matches!(err, ForecastError::Storage(_)));
    }

    #[test]
    fn test_chat_error_messages() {
        let err = ChatError::from(LlmError::AuthenticationFailed);
        assert_eq!(err.to_string(), "Error calling AI model: authentication failed");
        assert_eq!(
            ChatError::EmptyResponse.to_string(),
            "AI model returned null or empty response"
        );
        let err = ChatError::InvalidResponse {
            detail: "expected value at line 1".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to deserialize response from AI model");
    }

    #[test]
    fn test_missing_ai_settings_lists_fields() {
        let err = ConfigError::MissingAiSettings(vec![
            "deployment_uri".to_string(),
            "api_key".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "AI settings validation failed: missing deployment_uri, api_key"
        );
    }
}
