//! JSON body decoding that reports failures in the API's own error shapes.

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::http::error::AppError;

/// Unwrap a forecast body, turning a decode failure into a 400
/// `ErrorResponse` attributed to `property`.
pub fn forecast_body<T>(
    body: Result<Json<T>, JsonRejection>,
    property: &str,
) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected forecast body");
            Err(AppError::InvalidBody {
                property: property.to_string(),
                detail: rejection.body_text(),
            })
        }
    }
}

/// Unwrap the chat prompt, turning a decode failure into a 400 `{message}`.
pub fn prompt_body(body: Result<Json<String>, JsonRejection>) -> Result<String, AppError> {
    match body {
        Ok(Json(prompt)) => Ok(prompt),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected chat body");
            Err(AppError::InvalidPrompt(rejection.body_text()))
        }
    }
}
