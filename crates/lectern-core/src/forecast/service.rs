//! Forecast management service.
//!
//! Validates create/replace bodies, allocates keys, injects the simulated
//! fault used by the functional tests, and maps store errors onto
//! [`ForecastError`]. All state lives in the injected [`ForecastStore`].

use lectern_types::error::ForecastError;
use lectern_types::forecast::{
    CreateForecastRequest, ErrorNumber, ForecastId, ForecastRecord, ForecastResult,
    SUMMARY_MAX_LEN, SUMMARY_MIN_LEN, UpdateForecastRequest,
};

use super::store::{ForecastStore, UpsertOutcome};

/// Any id containing this marker makes `get` fail with a simulated fault.
pub const FAULT_INJECTION_MARKER: &str = "BadRobot";

/// Property name reported when the whole body is missing.
pub const BODY_PROPERTY: &str = "WeatherForecastCreate";

/// Outcome of [`ForecastService::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplaceOutcome {
    /// An existing record was fully overwritten.
    Updated,
    /// No record existed; one was created under the caller's key.
    Created(ForecastResult),
}

/// Service orchestrating the forecast lifecycle.
///
/// Generic over the store so the HTTP layer can run against the in-memory
/// store in production and in tests alike.
pub struct ForecastService<S: ForecastStore> {
    store: S,
}

impl<S: ForecastStore> ForecastService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store (used for seeding).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every stored forecast with its key, in store order.
    pub async fn list(&self) -> Result<Vec<ForecastResult>, ForecastError> {
        let entries = self.store.list().await?;
        Ok(entries
            .into_iter()
            .map(|(id, record)| record.with_id(id))
            .collect())
    }

    /// Get a forecast by key.
    pub async fn get(&self, id: &ForecastId) -> Result<ForecastRecord, ForecastError> {
        if id.as_str().contains(FAULT_INJECTION_MARKER) {
            return Err(ForecastError::SimulatedFault(id.to_string()));
        }

        self.store.get(id).await?.ok_or(ForecastError::NotFound)
    }

    /// Validate and store a new forecast under a freshly allocated key.
    pub async fn create(
        &self,
        body: Option<CreateForecastRequest>,
    ) -> Result<ForecastResult, ForecastError> {
        let record = validate(body)?;
        let id = ForecastId::generate();

        self.store.insert(id.clone(), record.clone()).await?;
        tracing::debug!(id = %id, "forecast created");

        Ok(record.with_id(id))
    }

    /// Overwrite the non-null fields of `update`.
    pub async fn patch(
        &self,
        id: &ForecastId,
        update: UpdateForecastRequest,
    ) -> Result<(), ForecastError> {
        if update.is_empty() {
            tracing::debug!(id = %id, "patch carries no fields");
        }
        self.store.patch(id, update).await?;
        Ok(())
    }

    /// Fully replace the forecast under `id`, creating it if absent.
    pub async fn replace(
        &self,
        id: ForecastId,
        body: Option<CreateForecastRequest>,
    ) -> Result<ReplaceOutcome, ForecastError> {
        let record = validate(body)?;

        match self.store.upsert(id.clone(), record.clone()).await? {
            UpsertOutcome::Replaced => Ok(ReplaceOutcome::Updated),
            UpsertOutcome::Created => {
                tracing::debug!(id = %id, "forecast created with client-provided id");
                Ok(ReplaceOutcome::Created(record.with_id(id)))
            }
        }
    }

    /// Remove a forecast.
    pub async fn delete(&self, id: &ForecastId) -> Result<(), ForecastError> {
        self.store.remove(id).await?;
        Ok(())
    }
}

/// Apply the create rules to a request body.
///
/// - The body must be present.
/// - `summary` must be non-blank and at most 60 characters.
/// - A missing `date` is stored as `0001-01-01T00:00:00`.
pub fn validate(body: Option<CreateForecastRequest>) -> Result<ForecastRecord, ForecastError> {
    let Some(body) = body else {
        return Err(ForecastError::must_not_be_null(
            BODY_PROPERTY,
            "Input body must not be null",
        ));
    };

    let summary = match body.summary {
        Some(s) if !s.trim().is_empty() => s,
        _ => {
            return Err(ForecastError::must_not_be_null(
                "Summary",
                "Input must not be null",
            ));
        }
    };

    let len = summary.chars().count();
    if !(SUMMARY_MIN_LEN..=SUMMARY_MAX_LEN).contains(&len) {
        return Err(ForecastError::Validation {
            property: "Summary".to_string(),
            number: ErrorNumber::LengthOutOfRange,
            message: format!(
                "Summary must be between {SUMMARY_MIN_LEN} and {SUMMARY_MAX_LEN} characters"
            ),
        });
    }

    Ok(ForecastRecord {
        date: body.date.unwrap_or_default(),
        temperature_c: body.temperature_c,
        summary,
    })
}
