//! LlmProvider trait definition.
//!
//! This is the core abstraction that all LLM providers implement.
//! Uses RPITIT for `complete`; see `BoxLlmProvider` for dynamic dispatch.

use lectern_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for chat-completion backends (Azure OpenAI, OpenAI-compatible, mocks).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in lectern-infra (e.g., `OpenAiCompatibleProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "azure_openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// One call is one outbound round trip; implementations must not retry.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
