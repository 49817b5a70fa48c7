//! Endpoint configuration for [`super::OpenAiCompatibleProvider`].

use std::time::Duration;

use async_openai::config::{AzureConfig, OpenAIConfig};
use secrecy::{ExposeSecret, SecretString};

use lectern_types::config::AiSettings;
use lectern_types::llm::{LlmError, ProviderType};

/// Everything needed to reach a chat-completion endpoint.
pub struct OpenAiCompatConfig {
    pub provider_type: ProviderType,
    /// Azure resource URL or OpenAI-style base URL (including `/v1`).
    pub base_url: String,
    pub api_key: SecretString,
    /// Azure deployment name or OpenAI model id.
    pub model: String,
    /// Azure `api-version` query value. Ignored for OpenAI-compatible endpoints.
    pub api_version: String,
    /// `None` leaves the model call unbounded.
    pub timeout: Option<Duration>,
}

impl OpenAiCompatConfig {
    /// Build from settings, failing with `InvalidRequest` when the URI or
    /// key is absent.
    pub fn from_settings(settings: &AiSettings) -> Result<Self, LlmError> {
        let base_url = settings
            .deployment_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| LlmError::InvalidRequest("deployment_uri is not set".to_string()))?;
        let api_key = settings
            .api_key
            .as_ref()
            .map(|key| SecretString::from(key.expose_secret().to_string()))
            .ok_or(LlmError::AuthenticationFailed)?;

        Ok(Self {
            provider_type: settings.provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: settings.deployment_model_name.clone(),
            api_version: settings.api_version.clone(),
            timeout: (settings.request_timeout_secs > 0)
                .then(|| Duration::from_secs(settings.request_timeout_secs)),
        })
    }

    /// Client config for an Azure OpenAI deployment.
    pub fn azure(&self) -> AzureConfig {
        AzureConfig::new()
            .with_api_base(&self.base_url)
            .with_api_version(&self.api_version)
            .with_deployment_id(&self.model)
            .with_api_key(self.api_key.expose_secret())
    }

    /// Client config for an OpenAI-compatible endpoint.
    pub fn openai(&self) -> OpenAIConfig {
        OpenAIConfig::new()
            .with_api_key(self.api_key.expose_secret())
            .with_api_base(&self.base_url)
    }
}
