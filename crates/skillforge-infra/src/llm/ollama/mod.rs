//! Ollama (local model) LLM provider implementation.
//!
//! Non-streaming `POST {base}/api/generate`; no authentication.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use skillforge_core::llm::provider::LlmProvider;
use skillforge_types::llm::{
    CompletionRequest, CompletionResponse, ProviderError, StopReason, Usage,
};

use crate::llm::http::{build_client, check_status, effective_model, join_url, map_send_error};

/// Default local Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "llama2";

#[derive(Debug, Clone, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Clone, Serialize)]
struct OllamaOptions {
    num_predict: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    model: String,
    response: Option<String>,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

/// Provider for a local Ollama server.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaProvider {
    pub fn new(
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        })
    }

    fn to_ollama_request(&self, request: &CompletionRequest) -> OllamaRequest {
        OllamaRequest {
            model: effective_model(&request.model, &self.model).to_string(),
            prompt: request.prompt_text(),
            system: request.system.clone(),
            stream: false,
            options: OllamaOptions {
                num_predict: request.max_tokens,
                temperature: request.temperature,
            },
        }
    }
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let body = self.to_ollama_request(request);
        let url = join_url(&self.base_url, "/api/generate");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;

        let response = check_status(response).await?;

        let ollama_resp: OllamaResponse = response.json().await.map_err(|e| {
            ProviderError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let content = ollama_resp.response.ok_or_else(|| {
            ProviderError::UnrecognizedEnvelope("missing 'response' field".to_string())
        })?;

        let stop_reason = match ollama_resp.done_reason.as_deref() {
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        };

        Ok(CompletionResponse {
            id: String::new(),
            content,
            model: ollama_resp.model,
            stop_reason,
            usage: Usage {
                input_tokens: ollama_resp.prompt_eval_count,
                output_tokens: ollama_resp.eval_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let provider = OllamaProvider::new(None, None, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.name(), "ollama");
        assert_eq!(provider.model(), "llama2");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_is_non_streaming() {
        let provider =
            OllamaProvider::new(Some("qwen2".to_string()), None, Duration::from_secs(5)).unwrap();
        let body = provider.to_ollama_request(&CompletionRequest::from_prompt("p", 100, None));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "qwen2");
        assert_eq!(json["prompt"], "p");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 100);
        assert!(json.get("system").is_none());
    }

    #[test]
    fn test_response_decoding() {
        let resp: OllamaResponse = serde_json::from_str(
            r#"{"model": "llama2", "created_at": "2024-01-01T00:00:00Z",
                "response": "{\"name\": \"Rust\"}", "done": true, "eval_count": 9}"#,
        )
        .unwrap();
        assert_eq!(resp.response.as_deref(), Some("{\"name\": \"Rust\"}"));
        assert_eq!(resp.eval_count, 9);
        assert_eq!(resp.prompt_eval_count, 0);
    }
}
