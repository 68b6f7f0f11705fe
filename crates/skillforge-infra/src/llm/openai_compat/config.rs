//! Configuration types and per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a factory
//! function returning an [`OpenAiCompatConfig`] with the correct base URL and
//! default model.

use std::time::Duration;

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "deepseek").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "gpt-3.5-turbo", "deepseek-chat").
    pub model: String,
    /// Bound on every HTTP request.
    pub timeout: Duration,
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`, model `gpt-3.5-turbo`.
pub fn openai_defaults(api_key: SecretString, model: Option<&str>, timeout: Duration) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.unwrap_or("gpt-3.5-turbo").into(),
        timeout,
    }
}

/// DeepSeek default configuration.
///
/// Base URL: `https://api.deepseek.com/v1`, model `deepseek-chat`.
pub fn deepseek_defaults(api_key: SecretString, model: Option<&str>, timeout: Duration) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "deepseek".into(),
        base_url: "https://api.deepseek.com/v1".into(),
        api_key,
        model: model.unwrap_or("deepseek-chat").into(),
        timeout,
    }
}
