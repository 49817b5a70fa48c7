//! Application error type mapping domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use lectern_types::error::{ChatError, ForecastError};
use lectern_types::forecast::{ErrorNumber, ErrorResponse};

/// Text of the 500 body for unexpected forecast failures. The correlation
/// id is appended.
pub const TECHNICAL_DIFFICULTIES: &str =
    "We are sorry experiencing technical difficulties at this time! Provide this number to tech support";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Forecast-related errors.
    Forecast(ForecastError),
    /// Key-phrase chat errors.
    Chat(ChatError),
    /// A forecast request body that could not be decoded.
    InvalidBody { property: String, detail: String },
    /// A chat request body that is not a JSON string.
    InvalidPrompt(String),
}

impl From<ForecastError> for AppError {
    fn from(e: ForecastError) -> Self {
        AppError::Forecast(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

fn bad_request(property: &str, number: ErrorNumber, message: &str) -> Response {
    let body = ErrorResponse {
        error_message: message.to_string(),
        error_number: number.code(),
        property_name: property.to_string(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// 500 with a fresh correlation id; the detail goes to the log only.
fn technical_difficulties(error: &ForecastError) -> Response {
    let correlation_id = uuid::Uuid::now_v7().to_string();
    tracing::error!(
        correlation_id = %correlation_id,
        error = %error,
        "unhandled forecast failure"
    );

    let body = json!({
        "message": format!("{TECHNICAL_DIFFICULTIES} {correlation_id}"),
        "correlationId": correlation_id,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Forecast(ForecastError::Validation {
                property,
                number,
                message,
            }) => bad_request(property, *number, message),
            AppError::Forecast(ForecastError::NotFound) => StatusCode::NOT_FOUND.into_response(),
            AppError::Forecast(e) => technical_difficulties(e),
            AppError::Chat(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": e.to_string() })),
            )
                .into_response(),
            AppError::InvalidBody { property, detail } => {
                bad_request(property, ErrorNumber::InvalidBody, detail)
            }
            AppError::InvalidPrompt(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": detail })),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use lectern_types::llm::LlmError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_error_response() {
        let err = AppError::from(ForecastError::must_not_be_null(
            "Summary",
            "Input must not be null",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["propertyName"], "Summary");
        assert_eq!(json["errorNumber"], 1);
        assert_eq!(json["errorMessage"], "Input must not be null");
    }

    #[tokio::test]
    async fn test_not_found_has_empty_body() {
        let response = AppError::from(ForecastError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn test_fault_hides_detail_behind_correlation_id() {
        let response =
            AppError::from(ForecastError::SimulatedFault("BadRobot".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        let correlation_id = json["correlationId"].as_str().unwrap();
        assert!(!correlation_id.is_empty());
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with(TECHNICAL_DIFFICULTIES));
        assert!(message.ends_with(correlation_id));
        assert!(!message.contains("BadRobot"));
    }

    #[tokio::test]
    async fn test_chat_error_message_is_forwarded() {
        let response = AppError::from(ChatError::from(LlmError::AuthenticationFailed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Error calling AI model: authentication failed");
    }

    #[tokio::test]
    async fn test_invalid_body_uses_error_number_three() {
        let response = AppError::InvalidBody {
            property: "WeatherForecastCreate".to_string(),
            detail: "expected value".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errorNumber"], 3);
    }
}
