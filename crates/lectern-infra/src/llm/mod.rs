//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](lectern_core::llm::provider::LlmProvider)
//! used by the chat demo and a factory ([`create_provider`]) that builds it
//! from [`AiSettings`].

pub mod openai_compat;

use lectern_core::llm::box_provider::BoxLlmProvider;
use lectern_types::config::AiSettings;
use lectern_types::llm::LlmError;

use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::OpenAiCompatConfig;

/// Create a [`BoxLlmProvider`] from the `[ai]` settings.
///
/// # Errors
///
/// Returns an error if the deployment URI or API key is missing, or if the
/// HTTP client cannot be constructed.
pub fn create_provider(settings: &AiSettings) -> Result<BoxLlmProvider, LlmError> {
    let config = OpenAiCompatConfig::from_settings(settings)?;
    let provider = OpenAiCompatibleProvider::new(config)?;
    tracing::debug!(
        provider = %settings.provider,
        base_url = %provider.base_url(),
        "LLM provider created"
    );
    Ok(BoxLlmProvider::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_types::llm::ProviderType;
    use secrecy::SecretString;

    #[test]
    fn test_create_provider_names() {
        let mut settings = AiSettings {
            deployment_uri: Some("https://demo.openai.azure.com".to_string()),
            api_key: Some(SecretString::from("k")),
            ..Default::default()
        };
        assert_eq!(create_provider(&settings).unwrap().name(), "azure_openai");

        settings.provider = ProviderType::OpenaiCompatible;
        assert_eq!(create_provider(&settings).unwrap().name(), "openai_compatible");
    }

    #[test]
    fn test_create_provider_requires_settings() {
        assert!(create_provider(&AiSettings::default()).is_err());
    }
}
