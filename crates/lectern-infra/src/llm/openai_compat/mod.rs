//! OpenAiCompatibleProvider -- concrete [`LlmProvider`] for chat-completion
//! endpoints speaking the OpenAI protocol.
//!
//! One implementation covers both Azure OpenAI deployments and plain
//! OpenAI-compatible servers. Uses [`async_openai`] for the typed wire
//! protocol; structured output is forwarded as a `json_schema` response
//! format.

pub mod config;

use async_openai::Client;
use async_openai::config::{AzureConfig, OpenAIConfig};
use async_openai::error::OpenAIError;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
    CreateChatCompletionResponse, FinishReason, ResponseFormat, ResponseFormatJsonSchema,
};

use lectern_core::llm::provider::LlmProvider;
use lectern_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ProviderType, StopReason, Usage,
};

use self::config::OpenAiCompatConfig;

/// The client flavour matching [`ProviderType`].
enum ChatClient {
    Azure(Client<AzureConfig>),
    OpenAi(Client<OpenAIConfig>),
}

/// Chat-completion provider for Azure OpenAI and OpenAI-compatible APIs.
///
/// Does NOT derive Debug: the API key lives inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: ChatClient,
    provider_type: ProviderType,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a provider. Fails only if the HTTP client cannot be built.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })?;

        let client = match config.provider_type {
            ProviderType::AzureOpenai => {
                ChatClient::Azure(Client::with_config(config.azure()).with_http_client(http))
            }
            ProviderType::OpenaiCompatible => {
                ChatClient::OpenAi(Client::with_config(config.openai()).with_http_client(http))
            }
        };

        Ok(Self {
            client,
            provider_type: config.provider_type,
            base_url: config.base_url,
            model: config.model,
        })
    }

    /// The configured deployment or model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The endpoint base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                        name: None,
                    })
                }
            })
            .collect();

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        let response_format = request.output_config.as_ref().map(|oc| {
            let schema = &oc.format.json_schema;
            ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: schema.name.clone(),
                    description: schema.description.clone(),
                    schema: Some(schema.schema.clone()),
                    strict: schema.strict,
                },
            }
        });

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            top_p: request.top_p.map(|p| p as f32),
            response_format,
            ..Default::default()
        }
    }
}

/// Reduce a chat-completion reply to a [`CompletionResponse`].
fn to_completion_response(response: CreateChatCompletionResponse) -> CompletionResponse {
    let choice = response.choices.into_iter().next();

    if let Some(refusal) = choice.as_ref().and_then(|c| c.message.refusal.as_deref()) {
        tracing::warn!(%refusal, "model refused the request");
    }

    let stop_reason = choice
        .as_ref()
        .and_then(|c| c.finish_reason.as_ref())
        .map(|fr| match fr {
            FinishReason::Length => StopReason::MaxTokens,
            FinishReason::ContentFilter => StopReason::ContentFilter,
            _ => StopReason::EndTurn,
        })
        .unwrap_or(StopReason::EndTurn);

    let content = choice
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    let usage = response
        .usage
        .map(|u| Usage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        })
        .unwrap_or_default();

    CompletionResponse {
        id: response.id,
        content,
        model: response.model,
        stop_reason,
        usage,
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        match self.provider_type {
            ProviderType::AzureOpenai => "azure_openai",
            ProviderType::OpenaiCompatible => "openai_compatible",
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = match &self.client {
            ChatClient::Azure(client) => client.chat().create(oai_request).await,
            ChatClient::OpenAi(client) => client.chat().create(oai_request).await,
        }
        .map_err(map_openai_error)?;

        Ok(to_completion_response(response))
    }
}

/// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
fn map_openai_error(err: OpenAIError) -> LlmError {
    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "invalid_api_key"
                || code == "401"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("invalid subscription key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded"
                || code == "429"
                || error_type == "rate_limit_error"
            {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "server_error" || error_type == "overloaded_error" {
                LlmError::Overloaded(api_err.message.clone())
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => match reqwest_err.status().map(|s| s.as_u16()) {
            Some(401 | 403) => LlmError::AuthenticationFailed,
            Some(429) => LlmError::RateLimited {
                retry_after_ms: None,
            },
            Some(503 | 529) => LlmError::Overloaded(err.to_string()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        },
        OpenAIError::JSONDeserialize(_, content) => {
            LlmError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}
