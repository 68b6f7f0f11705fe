//! OpenAI-compatible LLM provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenAI, DeepSeek and any
//! other chat-completions endpoint via configurable base URLs and factory
//! functions.
//!
//! Uses [`async_openai`] for type-safe request/response handling.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use secrecy::{ExposeSecret, SecretString};

use skillforge_core::llm::provider::LlmProvider;
use skillforge_types::llm::{
    CompletionRequest, CompletionResponse, MessageRole, ProviderError, StopReason, Usage,
};

use self::config::OpenAiCompatConfig;
use crate::llm::http::{build_client, effective_model};

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
    timeout_secs: u64,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, ProviderError> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        let http_client = build_client(config.timeout)?;

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            provider_name: config.provider_name,
            model: config.model,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    /// Create an OpenAI provider.
    ///
    /// Uses `https://api.openai.com/v1` as the base URL.
    pub fn openai(
        api_key: SecretString,
        model: Option<&str>,
        timeout: std::time::Duration,
    ) -> Result<Self, ProviderError> {
        Self::new(config::openai_defaults(api_key, model, timeout))
    }

    /// Create a DeepSeek provider.
    ///
    /// Uses `https://api.deepseek.com/v1` as the base URL.
    pub fn deepseek(
        api_key: SecretString,
        model: Option<&str>,
        timeout: std::time::Duration,
    ) -> Result<Self, ProviderError> {
        Self::new(config::deepseek_defaults(api_key, model, timeout))
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        CreateChatCompletionRequest {
            model: effective_model(&request.model, &self.model).to_string(),
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

// OpenAiCompatibleProvider intentionally does NOT derive Debug to prevent
// accidental exposure of the API key inside the async-openai Client.

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(|e| map_openai_error(e, self.timeout_secs))?;

        let choice = response.choices.first().ok_or_else(|| {
            ProviderError::UnrecognizedEnvelope("response carried no choices".to_string())
        })?;

        let content = choice.message.content.clone().ok_or_else(|| {
            ProviderError::UnrecognizedEnvelope("first choice carried no content".to_string())
        })?;

        let stop_reason = match choice.finish_reason {
            Some(FinishReason::Length) => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        };

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            stop_reason,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` to a [`ProviderError`].
fn map_openai_error(err: async_openai::error::OpenAIError, timeout_secs: u64) -> ProviderError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                ProviderError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                ProviderError::RateLimited {
                    retry_after_ms: None,
                }
            } else if code == "server_error" || error_type == "overloaded_error" {
                ProviderError::Overloaded(api_err.message.clone())
            } else {
                ProviderError::InvalidRequest(api_err.message.clone())
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if reqwest_err.is_timeout() {
                ProviderError::Timeout { secs: timeout_secs }
            } else if let Some(status) = reqwest_err.status() {
                ProviderError::from_status(status.as_u16(), err.to_string())
            } else {
                ProviderError::Http(err.to_string())
            }
        }
        OpenAIError::JSONDeserialize(_, content) => {
            ProviderError::Deserialization(format!("failed to parse response: {content}"))
        }
        OpenAIError::InvalidArgument(msg) => ProviderError::InvalidRequest(msg.clone()),
        _ => ProviderError::Http(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn timeout() -> Duration {
        Duration::from_secs(30)
    }

    #[test]
    fn test_openai_factory() {
        let provider =
            OpenAiCompatibleProvider::openai(SecretString::from("sk-test"), None, timeout())
                .unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-3.5-turbo");
        assert_eq!(provider.timeout_secs, 30);
    }

    #[test]
    fn test_deepseek_factory() {
        let provider =
            OpenAiCompatibleProvider::deepseek(SecretString::from("ds-key"), None, timeout())
                .unwrap();
        assert_eq!(provider.name(), "deepseek");
        assert_eq!(provider.model(), "deepseek-chat");
    }

    #[test]
    fn test_build_request_single_user_message() {
        let provider =
            OpenAiCompatibleProvider::deepseek(SecretString::from("ds-key"), None, timeout())
                .unwrap();
        let request = CompletionRequest::from_prompt("为\"Rust\"领域生成技能树", 2000, Some(0.7));

        let oai = provider.build_request(&request);
        assert_eq!(oai.model, "deepseek-chat");
        assert_eq!(oai.messages.len(), 1);
        assert!(matches!(oai.messages[0], ChatCompletionRequestMessage::User(_)));
        assert_eq!(oai.max_completion_tokens, Some(2000));
        assert_eq!(oai.temperature, Some(0.7));
    }

    #[test]
    fn test_build_request_with_system_prompt() {
        let provider =
            OpenAiCompatibleProvider::openai(SecretString::from("sk"), Some("gpt-4o"), timeout())
                .unwrap();
        let mut request = CompletionRequest::from_prompt("hi", 10, None);
        request.system = Some("json only".to_string());

        let oai = provider.build_request(&request);
        assert_eq!(oai.model, "gpt-4o");
        assert_eq!(oai.messages.len(), 2);
        assert!(matches!(oai.messages[0], ChatCompletionRequestMessage::System(_)));
        assert_eq!(oai.temperature, None);
    }
}
