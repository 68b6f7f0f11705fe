//! LlmProvider trait definition.
//!
//! This is the core abstraction that every provider adapter implements.
//! Uses RPITIT for `complete`; the object-safe wrapper lives in
//! [`super::box_provider`].

use skillforge_types::llm::{CompletionRequest, CompletionResponse, ProviderError};

/// Trait for LLM provider backends (OpenAI-compatible, Anthropic, Volcano, ...).
///
/// Each implementation owns one provider's request envelope (model name,
/// message array, token limit, auth header) and its response unwrapping.
/// Implementations do not retry; the generator decides whether a failure
/// is worth another attempt.
///
/// Implementations live in skillforge-infra (e.g., `AnthropicProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "deepseek", "volcano").
    fn name(&self) -> &str;

    /// The model this provider sends requests to when the request leaves it unset.
    fn model(&self) -> &str;

    /// Send a completion request and return the raw answer text with metadata.
    ///
    /// Fails with [`ProviderError`] on network failure, non-2xx status, or an
    /// envelope the adapter cannot unwrap. Dropping the returned future
    /// aborts the in-flight HTTP request.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, ProviderError>> + Send;
}
