//! HTTP/REST API layer for Lectern.
//!
//! Axum-based REST API serving the forecast CRUD demo under
//! `/api/weatherforecast` and the key-phrase demo at `/chat`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
