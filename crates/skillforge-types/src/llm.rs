//! LLM request/response types for SkillForge.
//!
//! These types model the data shapes for provider interactions:
//! completion requests and responses, provider configuration, and the
//! provider error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in an LLM conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in an LLM conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request to an LLM provider for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model override; empty means "use the provider's configured model".
    #[serde(default)]
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl CompletionRequest {
    /// A single-turn request carrying one user prompt.
    pub fn from_prompt(prompt: impl Into<String>, max_tokens: u32, temperature: Option<f64>) -> Self {
        Self {
            model: String::new(),
            messages: vec![Message::user(prompt)],
            system: None,
            max_tokens,
            temperature,
        }
    }

    /// Concatenated user-visible prompt text, for providers that take a flat prompt.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Response from an LLM provider for a non-streaming completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    /// Raw answer text. Untrusted: may contain prose, fences, or nothing useful.
    pub content: String,
    pub model: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

/// Reason why the LLM stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    /// The provider flagged the answer as incomplete without saying why.
    Incomplete,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::EndTurn => write!(f, "end_turn"),
            StopReason::MaxTokens => write!(f, "max_tokens"),
            StopReason::StopSequence => write!(f, "stop_sequence"),
            StopReason::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Token usage for a completion request/response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from provider operations.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("provider overloaded: {0}")]
    Overloaded(String),

    #[error("request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("unrecognized response envelope: {0}")]
    UnrecognizedEnvelope(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProviderError {
    /// Whether a retry of the same request could plausibly succeed.
    ///
    /// Network failures, timeouts, rate limiting, overload and 5xx statuses
    /// are transient. Auth, malformed requests and envelopes we cannot read
    /// will fail the same way again.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Http(_)
            | ProviderError::Timeout { .. }
            | ProviderError::RateLimited { .. }
            | ProviderError::Overloaded(_) => true,
            ProviderError::Status { status, .. } => *status >= 500,
            ProviderError::AuthenticationFailed
            | ProviderError::UnrecognizedEnvelope(_)
            | ProviderError::Deserialization(_)
            | ProviderError::InvalidRequest(_) => false,
        }
    }

    /// Map a non-2xx HTTP status and body to the matching error.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => ProviderError::AuthenticationFailed,
            429 => ProviderError::RateLimited {
                retry_after_ms: None,
            },
            529 => ProviderError::Overloaded(body),
            _ => ProviderError::Status { status, body },
        }
    }
}

/// Type of LLM provider backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
    Anthropic,
    Volcano,
    #[serde(alias = "local")]
    Ollama,
    Preset,
}

impl ProviderType {
    /// Whether the backend needs an API key to be constructed.
    pub fn requires_api_key(&self) -> bool {
        matches!(
            self,
            ProviderType::OpenAiCompatible | ProviderType::Anthropic | ProviderType::Volcano
        )
    }
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderType::OpenAiCompatible => write!(f, "openai_compatible"),
            ProviderType::Anthropic => write!(f, "anthropic"),
            ProviderType::Volcano => write!(f, "volcano"),
            ProviderType::Ollama => write!(f, "ollama"),
            ProviderType::Preset => write!(f, "preset"),
        }
    }
}

impl FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai_compatible" => Ok(ProviderType::OpenAiCompatible),
            "anthropic" => Ok(ProviderType::Anthropic),
            "volcano" => Ok(ProviderType::Volcano),
            "ollama" | "local" => Ok(ProviderType::Ollama),
            "preset" => Ok(ProviderType::Preset),
            other => Err(format!("invalid provider type: '{other}'")),
        }
    }
}

/// Configuration for the provider the generator talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Backend type for this provider.
    #[serde(default = "default_provider_type")]
    pub provider_type: ProviderType,
    /// Human-readable name (e.g., "openai", "deepseek"). For OpenAI-compatible
    /// backends without a `base_url`, the name selects well-known defaults.
    #[serde(default)]
    pub name: Option<String>,
    /// Model identifier; each adapter has its own default.
    #[serde(default)]
    pub model: Option<String>,
    /// Override the default base URL for the provider.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Upper bound on a single provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_provider_type() -> ProviderType {
    ProviderType::Preset
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl ProviderConfig {
    /// Name used in logs and responses: the configured name, else the type.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.provider_type.to_string())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            name: None,
            model: None,
            base_url: None,
            api_key_env: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
