//! Forecast store trait definition.

use lectern_types::error::RepositoryError;
use lectern_types::forecast::{ForecastId, ForecastRecord, UpdateForecastRequest};

/// Result of [`ForecastStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The key existed and its record was fully replaced.
    Replaced,
    /// The key was absent and a new record was inserted under it.
    Created,
}

/// Store of forecast records keyed by [`ForecastId`].
///
/// Each call is atomic with respect to the key it touches; nothing orders
/// calls from different requests. No validation happens at this layer.
/// Implementations live in lectern-infra (e.g., InMemoryForecastStore).
pub trait ForecastStore: Send + Sync {
    /// Every stored record with its key. Order is unspecified.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<(ForecastId, ForecastRecord)>, RepositoryError>>
           + Send;

    /// Get a record by key.
    fn get(
        &self,
        id: &ForecastId,
    ) -> impl std::future::Future<Output = Result<Option<ForecastRecord>, RepositoryError>> + Send;

    /// Insert a record under a fresh key. Fails with `Conflict` if the key is taken.
    fn insert(
        &self,
        id: ForecastId,
        record: ForecastRecord,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Overwrite the present fields of `update`. Fails with `NotFound` if absent.
    fn patch(
        &self,
        id: &ForecastId,
        update: UpdateForecastRequest,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace the record under `id`, or insert it if absent.
    fn upsert(
        &self,
        id: ForecastId,
        record: ForecastRecord,
    ) -> impl std::future::Future<Output = Result<UpsertOutcome, RepositoryError>> + Send;

    /// Remove a record. Fails with `NotFound` if absent.
    fn remove(
        &self,
        id: &ForecastId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
