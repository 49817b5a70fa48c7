//! Application state wiring services together.
//!
//! Each demo gets its own state type so either router can be mounted
//! without the other's configuration. Services are generic over store and
//! provider traits; the states pin them to the lectern-infra implementations.

use std::sync::Arc;

use lectern_core::chat::service::{CompletionOptions, KeyPhraseService};
use lectern_core::forecast::service::ForecastService;
use lectern_infra::llm::create_provider;
use lectern_infra::memory::forecast::InMemoryForecastStore;
use lectern_types::config::{AiSettings, ForecastSettings};
use lectern_types::error::ConfigError;

/// Concrete forecast service pinned to the in-memory store.
pub type ConcreteForecastService = ForecastService<InMemoryForecastStore>;

/// State of the forecast routes.
#[derive(Clone)]
pub struct ForecastState {
    pub service: Arc<ConcreteForecastService>,
}

impl ForecastState {
    pub fn new(store: InMemoryForecastStore) -> Self {
        Self {
            service: Arc::new(ForecastService::new(store)),
        }
    }

    /// Fresh store seeded with `settings.seed_count` random forecasts.
    pub fn seeded(settings: &ForecastSettings) -> Self {
        let store = InMemoryForecastStore::new();
        let ids = store.seed_random(settings.seed_count);
        tracing::info!(count = ids.len(), "seeded forecast store");
        Self::new(store)
    }
}

/// State of the chat route.
#[derive(Clone)]
pub struct ChatState {
    pub service: Arc<KeyPhraseService>,
}

impl ChatState {
    pub fn new(service: KeyPhraseService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Validate the AI settings and build the provider-backed service.
    ///
    /// Every missing setting is logged at error level before failing.
    pub fn from_settings(settings: &AiSettings) -> anyhow::Result<Self> {
        if let Err(e) = settings.validate() {
            if let ConfigError::MissingAiSettings(fields) = &e {
                for field in fields {
                    tracing::error!(setting = %field, "AI setting is missing or empty");
                }
            } else {
                tracing::error!(error = %e, "AI settings are invalid");
            }
            return Err(e.into());
        }

        let provider = create_provider(settings)?;
        tracing::info!(
            provider = provider.name(),
            model = %settings.deployment_model_name,
            "chat provider ready"
        );

        Ok(Self::new(KeyPhraseService::new(
            provider,
            CompletionOptions::from(settings),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_uses_seed_count() {
        let state = ForecastState::seeded(&ForecastSettings { seed_count: 3 });
        assert_eq!(state.service.store().len(), 3);
    }

    #[test]
    fn test_chat_state_requires_ai_settings() {
        let err = ChatState::from_settings(&AiSettings::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("deployment_uri"));
    }
}
