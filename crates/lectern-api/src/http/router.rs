//! Axum router configuration with middleware.
//!
//! Forecast routes live under `/api/weatherforecast` and are also mounted
//! under `/api/WeatherForecast`. The chat demo is `POST /chat`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::{ChatState, ForecastState};

/// Canonical prefix of the forecast routes, used in `Location` headers.
pub const FORECAST_PATH: &str = "/api/weatherforecast";

/// Alternate casing routed identically.
pub const FORECAST_PATH_PASCAL: &str = "/api/WeatherForecast";

/// Build the forecast CRUD routes.
fn forecast_routes(state: ForecastState) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::forecast::list_forecasts).post(handlers::forecast::create_forecast),
        )
        .route(
            "/{id}",
            get(handlers::forecast::get_forecast)
                .patch(handlers::forecast::patch_forecast)
                .put(handlers::forecast::replace_forecast)
                .delete(handlers::forecast::delete_forecast),
        )
        .with_state(state)
}

/// Build the router for whichever demos are enabled.
pub fn build_router(forecast: Option<ForecastState>, chat: Option<ChatState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new().route("/health", get(health_check));

    if let Some(state) = forecast {
        let routes = forecast_routes(state);
        router = router
            .nest(FORECAST_PATH, routes.clone())
            .nest(FORECAST_PATH_PASCAL, routes);
    }

    if let Some(state) = chat {
        router = router.merge(
            Router::new()
                .route("/chat", post(handlers::chat::extract_key_phrases))
                .with_state(state),
        );
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use lectern_infra::memory::forecast::InMemoryForecastStore;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let app = build_router(None, None);
        let resp = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn unmounted_demo_is_not_routed() {
        let app = build_router(None, None);
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(FORECAST_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn both_path_casings_are_routed() {
        let app = build_router(Some(ForecastState::new(InMemoryForecastStore::new())), None);
        for path in [FORECAST_PATH, FORECAST_PATH_PASCAL] {
            let resp = app
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "{path}");
        }
    }
}
