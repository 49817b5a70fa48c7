//! Forecast CRUD handlers for the REST API.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use lectern_core::forecast::service::{BODY_PROPERTY, ReplaceOutcome};
use lectern_types::forecast::{
    CreateForecastRequest, ForecastId, ForecastRecord, ForecastResult, UpdateForecastRequest,
};

use crate::http::error::AppError;
use crate::http::extractors::body::forecast_body;
use crate::http::router::FORECAST_PATH;
use crate::state::ForecastState;

/// Property reported when a PATCH body cannot be decoded.
const UPDATE_BODY_PROPERTY: &str = "WeatherForecastUpdate";

/// 201 with a relative `Location` pointing at the new record. The key is
/// percent-encoded so any client-supplied key yields a valid header.
fn created(result: ForecastResult) -> Response {
    let location = format!("{FORECAST_PATH}/{}", urlencoding::encode(result.id.as_str()));
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(result),
    )
        .into_response()
}

/// GET /api/weatherforecast - List every forecast with its key.
pub async fn list_forecasts(
    State(state): State<ForecastState>,
) -> Result<Json<Vec<ForecastResult>>, AppError> {
    Ok(Json(state.service.list().await?))
}

/// GET /api/weatherforecast/{id} - Get one forecast.
pub async fn get_forecast(
    State(state): State<ForecastState>,
    Path(id): Path<String>,
) -> Result<Json<ForecastRecord>, AppError> {
    let record = state.service.get(&ForecastId::from(id)).await?;
    Ok(Json(record))
}

/// POST /api/weatherforecast - Create a forecast under a new key.
pub async fn create_forecast(
    State(state): State<ForecastState>,
    body: Result<Json<Option<CreateForecastRequest>>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = forecast_body(body, BODY_PROPERTY)?;
    let result = state.service.create(body).await?;
    tracing::info!(id = %result.id, "forecast created");
    Ok(created(result))
}

/// PATCH /api/weatherforecast/{id} - Overwrite the supplied fields.
pub async fn patch_forecast(
    State(state): State<ForecastState>,
    Path(id): Path<String>,
    body: Result<Json<Option<UpdateForecastRequest>>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let update = forecast_body(body, UPDATE_BODY_PROPERTY)?.unwrap_or_default();
    state.service.patch(&ForecastId::from(id), update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/weatherforecast/{id} - Replace a forecast, creating it if absent.
pub async fn replace_forecast(
    State(state): State<ForecastState>,
    Path(id): Path<String>,
    body: Result<Json<Option<CreateForecastRequest>>, JsonRejection>,
) -> Result<Response, AppError> {
    let body = forecast_body(body, BODY_PROPERTY)?;
    match state.service.replace(ForecastId::from(id), body).await? {
        ReplaceOutcome::Updated => Ok(StatusCode::NO_CONTENT.into_response()),
        ReplaceOutcome::Created(result) => {
            tracing::info!(id = %result.id, "forecast created by replace");
            Ok(created(result))
        }
    }
}

/// DELETE /api/weatherforecast/{id} - Remove a forecast.
pub async fn delete_forecast(
    State(state): State<ForecastState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.service.delete(&ForecastId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
