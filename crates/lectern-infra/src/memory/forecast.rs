//! DashMap-backed implementation of [`ForecastStore`].
//!
//! Every operation locks only the shard holding its key, so single-key
//! reads and writes are atomic without a global lock. `list` walks the
//! shards one at a time and may observe concurrent writes partially.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use rand::seq::IndexedRandom;

use lectern_core::forecast::store::{ForecastStore, UpsertOutcome};
use lectern_types::error::RepositoryError;
use lectern_types::forecast::{
    ForecastId, ForecastRecord, SEED_SUMMARIES, UpdateForecastRequest,
};

/// Lowest temperature used when seeding.
const SEED_MIN_TEMPERATURE_C: i32 = -20;
/// Highest temperature (exclusive) used when seeding.
const SEED_MAX_TEMPERATURE_C: i32 = 55;

/// Process-wide forecast store. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct InMemoryForecastStore {
    records: Arc<DashMap<ForecastId, ForecastRecord>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `count` random forecasts dated tomorrow, the day after, and so on.
    ///
    /// Temperatures are drawn from -20..55 and summaries from
    /// [`SEED_SUMMARIES`]. Returns the generated keys in insertion order.
    pub fn seed_random(&self, count: usize) -> Vec<ForecastId> {
        let mut rng = rand::rng();
        let now = Utc::now();

        (0..count)
            .map(|offset| {
                let id = ForecastId::generate();
                let record = ForecastRecord {
                    date: (now + Duration::days(offset as i64 + 1)).into(),
                    temperature_c: rng.random_range(SEED_MIN_TEMPERATURE_C..SEED_MAX_TEMPERATURE_C),
                    summary: SEED_SUMMARIES
                        .choose(&mut rng)
                        .copied()
                        .unwrap_or(SEED_SUMMARIES[0])
                        .to_string(),
                };
                self.records.insert(id.clone(), record);
                id
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ForecastStore for InMemoryForecastStore {
    async fn list(&self) -> Result<Vec<(ForecastId, ForecastRecord)>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn get(&self, id: &ForecastId) -> Result<Option<ForecastRecord>, RepositoryError> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, id: ForecastId, record: ForecastRecord) -> Result<(), RepositoryError> {
        match self.records.entry(id) {
            Entry::Occupied(entry) => Err(RepositoryError::Conflict(format!(
                "forecast '{}' already exists",
                entry.key()
            ))),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    async fn patch(
        &self,
        id: &ForecastId,
        update: UpdateForecastRequest,
    ) -> Result<(), RepositoryError> {
        let mut entry = self.records.get_mut(id).ok_or(RepositoryError::NotFound)?;
        entry.apply(update);
        Ok(())
    }

    async fn upsert(
        &self,
        id: ForecastId,
        record: ForecastRecord,
    ) -> Result<UpsertOutcome, RepositoryError> {
        Ok(match self.records.insert(id, record) {
            Some(_) => UpsertOutcome::Replaced,
            None => UpsertOutcome::Created,
        })
    }

    async fn remove(&self, id: &ForecastId) -> Result<(), RepositoryError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_types::forecast::SUMMARY_MAX_LEN;

    fn record(summary: &str, temperature_c: i32) -> ForecastRecord {
        ForecastRecord {
            date: "2026-01-20T12:00:00Z".parse().unwrap(),
            temperature_c,
            summary: summary.to_string(),
        }
    }

    #[tokio::test]
    async fn test_seed_random_inserts_count_records() {
        let store = InMemoryForecastStore::new();
        let ids = store.seed_random(5);
        assert_eq!(ids.len(), 5);
        assert_eq!(store.len(), 5);

        for (_, rec) in store.list().await.unwrap() {
            assert!((SEED_MIN_TEMPERATURE_C..SEED_MAX_TEMPERATURE_C).contains(&rec.temperature_c));
            assert!(SEED_SUMMARIES.contains(&rec.summary.as_str()));
            assert!(rec.summary.chars().count() <= SUMMARY_MAX_LEN);
        }
    }

    #[tokio::test]
    async fn test_seed_dates_advance_by_day() {
        let store = InMemoryForecastStore::new();
        let ids = store.seed_random(3);
        let first = store.get(&ids[0]).await.unwrap().unwrap().date;
        let third = store.get(&ids[2]).await.unwrap().unwrap().date;
        assert_eq!(third.instant() - first.instant(), Duration::days(2));
    }

    #[tokio::test]
    async fn test_seed_zero_leaves_store_empty() {
        let store = InMemoryForecastStore::new();
        assert!(store.seed_random(0).is_empty());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_insert_conflict() {
        let store = InMemoryForecastStore::new();
        let id = ForecastId::from("k");
        store.insert(id.clone(), record("A", 1)).await.unwrap();
        let err = store.insert(id.clone(), record("B", 2)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.get(&id).await.unwrap().unwrap().summary, "A");
    }

    #[tokio::test]
    async fn test_patch_and_missing_key() {
        let store = InMemoryForecastStore::new();
        let id = ForecastId::from("k");
        store.insert(id.clone(), record("A", 1)).await.unwrap();

        store
            .patch(
                &id,
                UpdateForecastRequest {
                    temperature_c: Some(9),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let rec = store.get(&id).await.unwrap().unwrap();
        assert_eq!(rec.temperature_c, 9);
        assert_eq!(rec.summary, "A");

        let err = store
            .patch(&ForecastId::from("missing"), UpdateForecastRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_upsert_reports_outcome() {
        let store = InMemoryForecastStore::new();
        let id = ForecastId::from("k");
        assert_eq!(
            store.upsert(id.clone(), record("A", 1)).await.unwrap(),
            UpsertOutcome::Created
        );
        assert_eq!(
            store.upsert(id.clone(), record("B", 2)).await.unwrap(),
            UpsertOutcome::Replaced
        );
        assert_eq!(store.get(&id).await.unwrap().unwrap().summary, "B");
    }

    #[tokio::test]
    async fn test_remove_then_remove_again() {
        let store = InMemoryForecastStore::new();
        let id = ForecastId::from("k");
        store.insert(id.clone(), record("A", 1)).await.unwrap();
        store.remove(&id).await.unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
        assert!(matches!(
            store.remove(&id).await.unwrap_err(),
            RepositoryError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryForecastStore::new();
        let other = store.clone();
        other.insert(ForecastId::from("k"), record("A", 1)).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_land() {
        let store = InMemoryForecastStore::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert(ForecastId::generate(), record("Mild", i))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len(), 32);
    }
}
