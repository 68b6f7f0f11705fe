//! VolcanoProvider -- [`LlmProvider`] for the Volcano Engine Ark responses API.
//!
//! Bearer-authenticated `POST {base}/responses`. The answer is read from the
//! assistant message first and from the reasoning summary when the message
//! is missing or empty.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use skillforge_core::llm::provider::LlmProvider;
use skillforge_types::llm::{
    CompletionRequest, CompletionResponse, ProviderError, StopReason, Usage,
};

use super::types::{
    AnswerSource, VolcanoInputContent, VolcanoInputMessage, VolcanoRequest, VolcanoResponse,
};
use crate::llm::http::{build_client, check_status, effective_model, join_url, map_send_error};

/// Default Ark API base.
pub const DEFAULT_BASE_URL: &str = "https://ark.cn-beijing.volces.com/api/v3";

/// Default model when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "doubao-seed-1-8-251228";

/// Volcano Engine (Ark) LLM provider.
///
/// Holds the API key as a [`SecretString`]; does not derive Debug.
pub struct VolcanoProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl VolcanoProvider {
    pub fn new(
        api_key: SecretString,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
        })
    }

    fn to_volcano_request(&self, request: &CompletionRequest) -> VolcanoRequest {
        let mut input = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            input.push(VolcanoInputMessage {
                role: "system".to_string(),
                content: vec![VolcanoInputContent::InputText {
                    text: system.clone(),
                }],
            });
        }
        input.extend(request.messages.iter().map(|m| VolcanoInputMessage {
            role: m.role.to_string(),
            content: vec![VolcanoInputContent::InputText {
                text: m.content.clone(),
            }],
        }));

        VolcanoRequest {
            model: effective_model(&request.model, &self.model).to_string(),
            input,
            max_output_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

/// Unwrap the envelope into a [`CompletionResponse`].
fn into_completion(response: VolcanoResponse) -> Result<CompletionResponse, ProviderError> {
    let (content, source) = response.answer().ok_or_else(|| {
        ProviderError::UnrecognizedEnvelope(
            "no assistant output_text or reasoning summary_text in output".to_string(),
        )
    })?;

    if source == AnswerSource::ReasoningSummary {
        tracing::debug!("Volcano answer taken from reasoning summary");
    }

    let stop_reason = if response.is_incomplete() {
        StopReason::Incomplete
    } else {
        StopReason::EndTurn
    };
    let usage = response
        .usage
        .as_ref()
        .map(|u| Usage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        })
        .unwrap_or_default();

    Ok(CompletionResponse {
        id: response.id.clone(),
        content: content.to_string(),
        model: response.model.clone(),
        stop_reason,
        usage,
    })
}

impl LlmProvider for VolcanoProvider {
    fn name(&self) -> &str {
        "volcano"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let body = self.to_volcano_request(request);
        let url = join_url(&self.base_url, "/responses");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;

        let response = check_status(response).await?;

        let envelope: VolcanoResponse = response.json().await.map_err(|e| {
            ProviderError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        into_completion(envelope)
    }
}
