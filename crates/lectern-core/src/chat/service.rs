//! KeyPhraseService: one structured-output call per chat request.

use lectern_types::chat::{DemoVariant, KeyPhrases, KEY_PHRASE_COUNT};
use lectern_types::config::AiSettings;
use lectern_types::error::ChatError;
use lectern_types::llm::{CompletionRequest, OutputConfig};
use tracing::{Instrument, error, info, info_span};

use super::prompt::{SCHEMA_DESCRIPTION, SCHEMA_NAME, build_messages};
use crate::llm::box_provider::BoxLlmProvider;

/// Sampling parameters applied to every call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

impl From<&AiSettings> for CompletionOptions {
    fn from(settings: &AiSettings) -> Self {
        Self {
            model: settings.deployment_model_name.clone(),
            temperature: settings.temperature,
            top_p: settings.top_p,
            max_tokens: settings.max_output_tokens,
        }
    }
}

/// Sends prompts to the configured model and returns exactly
/// [`KEY_PHRASE_COUNT`] key phrases.
///
/// Holds no per-request state; one instance serves concurrent requests.
pub struct KeyPhraseService {
    provider: BoxLlmProvider,
    options: CompletionOptions,
}

impl KeyPhraseService {
    pub fn new(provider: BoxLlmProvider, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    fn build_request(&self, variant: DemoVariant, prompt: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.options.model.clone(),
            messages: build_messages(variant, prompt),
            max_tokens: self.options.max_tokens,
            temperature: Some(self.options.temperature),
            top_p: Some(self.options.top_p),
            output_config: Some(OutputConfig::json_schema(
                SCHEMA_NAME,
                SCHEMA_DESCRIPTION,
                KeyPhrases::json_schema(),
            )),
        }
    }

    /// Ask the model for the key phrases of `prompt` using `variant`'s
    /// prompt strategy.
    pub async fn extract(
        &self,
        prompt: &str,
        variant: DemoVariant,
    ) -> Result<KeyPhrases, ChatError> {
        let request = self.build_request(variant, prompt);

        let span = info_span!(
            "gen_ai.complete",
            gen_ai.operation.name = "chat",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = request.max_tokens,
            gen_ai.request.temperature = ?request.temperature,
            gen_ai.request.top_p = ?request.top_p,
            demo = %variant,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        let response = match self
            .provider
            .complete(&request)
            .instrument(span.clone())
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, demo = %variant, "Error calling AI model");
                return Err(ChatError::Upstream(e));
            }
        };

        span.record("gen_ai.usage.input_tokens", response.usage.input_tokens);
        span.record("gen_ai.usage.output_tokens", response.usage.output_tokens);

        let content = response.content.trim();
        if content.is_empty() {
            error!(response_id = %response.id, "AI model returned null or empty response");
            return Err(ChatError::EmptyResponse);
        }

        info!(
            response_id = %response.id,
            stop_reason = %response.stop_reason,
            response = %content,
            "AI model response"
        );

        parse_key_phrases(content)
    }
}

/// Decode the model's JSON reply, requiring exactly [`KEY_PHRASE_COUNT`]
/// non-blank phrases.
pub fn parse_key_phrases(content: &str) -> Result<KeyPhrases, ChatError> {
    let phrases: KeyPhrases = serde_json::from_str(content).map_err(|e| {
        error!(error = %e, "Failed to deserialize response from AI model");
        ChatError::InvalidResponse {
            detail: e.to_string(),
        }
    })?;

    if !phrases.is_complete() {
        let detail = format!(
            "expected {KEY_PHRASE_COUNT} non-blank key phrases, got {:?}",
            phrases.phrases
        );
        error!(%detail, "Failed to deserialize response from AI model");
        return Err(ChatError::InvalidResponse { detail });
    }

    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use lectern_types::llm::{
        CompletionResponse, LlmError, MessageRole, StopReason, Usage,
    };

    use super::*;
    use crate::llm::provider::LlmProvider;

    enum Reply {
        Content(&'static str),
        RateLimited,
    }

    /// Returns a canned reply and records the request it was given.
    struct ScriptedProvider {
        reply: Reply,
        seen: Arc<Mutex<Option<CompletionRequest>>>,
    }

    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            *self.seen.lock().unwrap() = Some(request.clone());
            match self.reply {
                Reply::Content(text) => Ok(CompletionResponse {
                    id: "chatcmpl-1".to_string(),
                    content: text.to_string(),
                    model: request.model.clone(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage {
                        input_tokens: 12,
                        output_tokens: 8,
                    },
                }),
                Reply::RateLimited => Err(LlmError::RateLimited {
                    retry_after_ms: None,
                }),
            }
        }
    }

    fn options() -> CompletionOptions {
        CompletionOptions {
            model: "gpt-5-mini".to_string(),
            temperature: 1.0,
            top_p: 1.0,
            max_tokens: 500,
        }
    }

    fn service(reply: Reply) -> (KeyPhraseService, Arc<Mutex<Option<CompletionRequest>>>) {
        let seen = Arc::new(Mutex::new(None));
        let provider = ScriptedProvider {
            reply,
            seen: Arc::clone(&seen),
        };
        (
            KeyPhraseService::new(BoxLlmProvider::new(provider), options()),
            seen,
        )
    }

    const GOOD: &str = r#"{"phrases":["sky","blue","weather"]}"#;

    #[tokio::test]
    async fn test_extract_returns_three_phrases() {
        let (svc, _) = service(Reply::Content(GOOD));
        let phrases = svc
            .extract("The sky is blue.", DemoVariant::Demo01)
            .await
            .unwrap();
        assert_eq!(phrases.phrases, vec!["sky", "blue", "weather"]);
    }

    #[tokio::test]
    async fn test_extract_sends_structured_output_request() {
        let (svc, seen) = service(Reply::Content(GOOD));
        svc.extract("text", DemoVariant::Demo01).await.unwrap();

        let request = seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.model, "gpt-5-mini");
        assert_eq!(request.max_tokens, 500);
        assert_eq!(request.temperature, Some(1.0));
        assert_eq!(request.top_p, Some(1.0));

        let output = request.output_config.unwrap();
        assert_eq!(output.format.type_field, "json_schema");
        assert_eq!(output.format.json_schema.name, "ChatResponse");
        assert_eq!(output.format.json_schema.strict, Some(true));
        assert_eq!(
            output.format.json_schema.schema["properties"]["phrases"]["type"],
            "array"
        );
    }

    #[tokio::test]
    async fn test_demo02_sends_system_message() {
        let (svc, seen) = service(Reply::Content(GOOD));
        svc.extract("text", DemoVariant::Demo02).await.unwrap();

        let request = seen.lock().unwrap().clone().unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].content, "text");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_reported() {
        let (svc, _) = service(Reply::RateLimited);
        let err = svc.extract("text", DemoVariant::Demo01).await.unwrap_err();
        assert!(matches!(err, ChatError::Upstream(LlmError::RateLimited { .. })));
        assert!(err.to_string().starts_with("Error calling AI model: "));
    }

    #[tokio::test]
    async fn test_blank_reply_is_empty_response() {
        for reply in ["", "  \n "] {
            let (svc, _) = service(Reply::Content(reply));
            let err = svc.extract("text", DemoVariant::Demo01).await.unwrap_err();
            assert!(matches!(err, ChatError::EmptyResponse));
        }
    }

    #[tokio::test]
    async fn test_non_json_reply_is_invalid() {
        let (svc, _) = service(Reply::Content("sky, blue, weather"));
        let err = svc.extract("text", DemoVariant::Demo01).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_wrong_phrase_count_is_invalid() {
        let (svc, _) = service(Reply::Content(r#"{"phrases":["sky","blue"]}"#));
        let err = svc.extract("text", DemoVariant::Demo01).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to deserialize response from AI model");
    }

    #[tokio::test]
    async fn test_reply_with_extra_property_is_invalid() {
        let (svc, _) = service(Reply::Content(
            r#"{"phrases":["sky","blue","weather"],"extra":1}"#,
        ));
        let err = svc.extract("text", DemoVariant::Demo01).await.unwrap_err();
        assert!(matches!(err, ChatError::InvalidResponse { .. }));
    }

    #[test]
    fn test_parse_rejects_blank_phrase() {
        let err = parse_key_phrases(r#"{"phrases":["sky","","weather"]}"#).unwrap_err();
        assert!(matches!(err, ChatError::InvalidResponse { .. }));
    }

    #[test]
    fn test_options_from_settings() {
        let settings = AiSettings {
            temperature: 0.3,
            ..Default::default()
        };
        let opts = CompletionOptions::from(&settings);
        assert_eq!(opts.temperature, 0.3);
        assert_eq!(opts.model, "gpt-5-mini");
        assert_eq!(opts.max_tokens, 500);
    }
}
