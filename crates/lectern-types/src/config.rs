//! Configuration types for Lectern.
//!
//! `LecternConfig` represents the top-level `lectern.toml`. Every section
//! and field has a default, so an absent file yields a usable forecast demo;
//! the chat demo additionally needs a deployment URI and API key.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::llm::ProviderType;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct LecternConfig {
    #[serde(default)]
    pub ai: AiSettings,

    #[serde(default)]
    pub forecast: ForecastSettings,
}

/// Settings for the chat-completion model used by the chat demo.
///
/// Does not implement `Serialize`: the API key must never be written back out.
#[derive(Debug, Deserialize)]
pub struct AiSettings {
    /// Endpoint of the AI deployment (Azure resource URL or OpenAI base URL).
    pub deployment_uri: Option<String>,

    /// API key for the AI service.
    pub api_key: Option<SecretString>,

    /// Deployment (Azure) or model (OpenAI-compatible) name.
    #[serde(default = "default_model_name")]
    pub deployment_model_name: String,

    /// Wire dialect of the endpoint.
    #[serde(default)]
    pub provider: ProviderType,

    /// Azure OpenAI `api-version` query value.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Sampling temperature. Higher is more random.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Maximum number of tokens in the reply.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-request HTTP timeout for the model call. `0` means no timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_model_name() -> String {
    "gpt-5-mini".to_string()
}

fn default_api_version() -> String {
    "2024-10-21".to_string()
}

fn default_temperature() -> f64 {
    1.0
}

fn default_top_p() -> f64 {
    1.0
}

fn default_max_output_tokens() -> u32 {
    500
}

fn default_request_timeout_secs() -> u64 {
    0
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            deployment_uri: None,
            api_key: None,
            deployment_model_name: default_model_name(),
            provider: ProviderType::default(),
            api_version: default_api_version(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl AiSettings {
    /// Names of required settings that are missing or blank.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self
            .deployment_uri
            .as_deref()
            .is_none_or(|uri| uri.trim().is_empty())
        {
            missing.push("deployment_uri".to_string());
        }
        if self
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().trim().is_empty())
        {
            missing.push("api_key".to_string());
        }
        missing
    }

    /// Check that the chat demo can be started with these settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::MissingAiSettings(missing));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature".to_string(),
                message: format!("{} is outside 0.0..=2.0", self.temperature),
            });
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "top_p".to_string(),
                message: format!("{} is outside (0.0, 1.0]", self.top_p),
            });
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigError::Invalid {
                field: "max_output_tokens".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings for the forecast store demo.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSettings {
    /// Number of random forecasts inserted at startup.
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
}

fn default_seed_count() -> usize {
    5
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            seed_count: default_seed_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> AiSettings {
        AiSettings {
            deployment_uri: Some("https://example.openai.azure.com".to_string()),
            api_key: Some(SecretString::from("sk-test".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_config_default_values() {
        let config = LecternConfig::default();
        assert_eq!(config.ai.deployment_model_name, "gpt-5-mini");
        assert_eq!(config.ai.temperature, 1.0);
        assert_eq!(config.ai.top_p, 1.0);
        assert_eq!(config.ai.max_output_tokens, 500);
        assert_eq!(config.ai.request_timeout_secs, 0);
        assert_eq!(config.ai.provider, ProviderType::AzureOpenai);
        assert_eq!(config.forecast.seed_count, 5);
    }

    #[test]
    fn test_config_toml_partial() {
        let config: LecternConfig = toml::from_str(
            r#"
[ai]
deployment_uri = "https://example.openai.azure.com"
api_key = "secret"
temperature = 0.2

[forecast]
seed_count = 0
"#,
        )
        .unwrap();
        assert_eq!(config.ai.temperature, 0.2);
        assert_eq!(config.ai.top_p, 1.0);
        assert_eq!(config.ai.api_key.unwrap().expose_secret(), "secret");
        assert_eq!(config.forecast.seed_count, 0);
    }

    #[test]
    fn test_config_empty_toml() {
        let config: LecternConfig = toml::from_str("").unwrap();
        assert!(config.ai.deployment_uri.is_none());
        assert_eq!(config.forecast.seed_count, 5);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let settings = AiSettings::default();
        match settings.validate() {
            Err(ConfigError::MissingAiSettings(fields)) => {
                assert_eq!(fields, vec!["deployment_uri", "api_key"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_treats_blank_as_missing() {
        let settings = AiSettings {
            deployment_uri: Some("   ".to_string()),
            ..configured()
        };
        assert_eq!(settings.missing_fields(), vec!["deployment_uri"]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_sampling() {
        let settings = AiSettings {
            top_p: 0.0,
            ..configured()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { ref field, .. }) if field == "top_p"
        ));

        let settings = AiSettings {
            temperature: 3.5,
            ..configured()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_configured() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", configured());
        assert!(!rendered.contains("sk-test"));
    }
}
