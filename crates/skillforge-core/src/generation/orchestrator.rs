//! SkillTreeGenerator -- sequences the whole generation pipeline.
//!
//! prompt -> provider (with retry and timeout) -> extractor -> validator ->
//! id rewriter. Any provider, extraction or validation failure is logged and
//! replaced by the fallback tree, so callers only ever see
//! [`GenerationError::EmptyDomain`] or [`GenerationError::Cancelled`].

use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use skillforge_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_REQUEST_MAX_TOKENS, GEN_AI_REQUEST_MODEL,
    GEN_AI_REQUEST_TEMPERATURE, OP_GENERATE_SKILL_TREE,
};

use skillforge_types::config::GenerationConfig;
use skillforge_types::error::{ExtractionError, GenerationError, ValidationError};
use skillforge_types::llm::ProviderError;
use skillforge_types::skill::{SkillLevel, SkillNode};

use super::extractor::{extract_json, preview};
use super::fallback::{DomainHint, fallback_tree};
use super::ids::rewrite_ids;
use super::prompt::SkillTreePromptBuilder;
use super::validator::validate_tree;
use crate::llm::box_provider::BoxLlmProvider;

/// Default per-attempt bound when the caller does not set one.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Characters of raw provider text kept in debug logs.
const RAW_PREVIEW_CHARS: usize = 200;

/// Pipeline stage at which a provider answer was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Provider,
    Extraction,
    Validation,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Provider => write!(f, "provider"),
            FailureStage::Extraction => write!(f, "extraction"),
            FailureStage::Validation => write!(f, "validation"),
        }
    }
}

/// Where a returned tree came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TreeOrigin {
    /// Validated provider output.
    Provider { provider: String },
    /// Fallback tree, after a failure at `stage`.
    Fallback { stage: FailureStage },
}

/// A generated tree together with its origin.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTree {
    pub tree: SkillNode,
    pub origin: TreeOrigin,
}

impl GeneratedTree {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, TreeOrigin::Fallback { .. })
    }
}

/// Internal failure of the provider path, converted to a fallback.
#[derive(Debug, thiserror::Error)]
enum PipelineFailure {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PipelineFailure {
    fn stage(&self) -> FailureStage {
        match self {
            PipelineFailure::Provider(_) => FailureStage::Provider,
            PipelineFailure::Extraction(_) => FailureStage::Extraction,
            PipelineFailure::Validation(_) => FailureStage::Validation,
        }
    }
}

/// Turns a domain and level into a validated, uniquely-id'd skill tree.
///
/// Stateless between calls: share it behind an `Arc` and call it from as
/// many tasks as needed. The provider adapter is chosen at construction and
/// never named here.
pub struct SkillTreeGenerator {
    provider: BoxLlmProvider,
    config: GenerationConfig,
    request_timeout: Duration,
}

impl SkillTreeGenerator {
    pub fn new(provider: BoxLlmProvider, config: GenerationConfig) -> Self {
        Self {
            provider,
            config,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Bound each provider attempt by `timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn provider_model(&self) -> &str {
        self.provider.model()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate a tree for `domain`. `language` defaults to the configured one.
    pub async fn generate(
        &self,
        domain: &str,
        level: SkillLevel,
        language: Option<&str>,
    ) -> Result<SkillNode, GenerationError> {
        Ok(self.generate_detailed(domain, level, language).await?.tree)
    }

    /// Like [`Self::generate`], also reporting whether the fallback was used.
    pub async fn generate_detailed(
        &self,
        domain: &str,
        level: SkillLevel,
        language: Option<&str>,
    ) -> Result<GeneratedTree, GenerationError> {
        self.run(domain, level, language, None).await
    }

    /// Like [`Self::generate_detailed`], abandoning the call when `cancel` fires.
    ///
    /// Cancellation drops the in-flight provider future, which aborts its
    /// HTTP request.
    pub async fn generate_with_cancel(
        &self,
        domain: &str,
        level: SkillLevel,
        language: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<GeneratedTree, GenerationError> {
        self.run(domain, level, language, Some(cancel)).await
    }

    #[tracing::instrument(
        name = "generate_skill_tree",
        skip(self, cancel),
        fields(
            domain = %domain.trim(),
            level = %level,
            language = tracing::field::Empty,
            provider = %self.provider.name(),
        )
    )]
    async fn run(
        &self,
        domain: &str,
        level: SkillLevel,
        language: Option<&str>,
        cancel: Option<&CancellationToken>,
    ) -> Result<GeneratedTree, GenerationError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(GenerationError::EmptyDomain);
        }
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.config.language);
        tracing::Span::current().record("language", language);

        let produced = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    tracing::info!("Generation cancelled by caller");
                    return Err(GenerationError::Cancelled);
                }
                result = self.produce(domain, level, language) => result,
            },
            None => self.produce(domain, level, language).await,
        };

        let (mut tree, origin) = match produced {
            Ok(tree) => (
                tree,
                TreeOrigin::Provider {
                    provider: self.provider.name().to_string(),
                },
            ),
            Err(failure) => {
                let stage = failure.stage();
                tracing::warn!(
                    domain,
                    stage = %stage,
                    error = %failure,
                    "Skill tree generation failed; using fallback tree"
                );
                (
                    fallback_tree(DomainHint::Known(domain), language),
                    TreeOrigin::Fallback { stage },
                )
            }
        };

        rewrite_ids(&mut tree);
        tracing::debug!(nodes = tree.node_count(), "Skill tree ready");

        Ok(GeneratedTree { tree, origin })
    }

    /// Provider path only: prompt, call, extract, validate.
    async fn produce(
        &self,
        domain: &str,
        level: SkillLevel,
        language: &str,
    ) -> Result<SkillNode, PipelineFailure> {
        let prompt = SkillTreePromptBuilder::build(
            domain,
            level,
            language,
            self.config.max_depth,
            self.config.include_resources,
        );
        let raw = self.generate_with_retry(&prompt).await?;
        tracing::debug!(
            raw_len = raw.len(),
            preview = preview(&raw, RAW_PREVIEW_CHARS),
            "Provider response received"
        );

        let candidate = extract_json(&raw)?;
        Ok(validate_tree(&candidate)?)
    }

    /// Call the provider, retrying transient failures with linear backoff.
    ///
    /// Gives up early when the provider asks to wait longer than
    /// `max_backoff_ms`.
    async fn generate_with_retry(&self, prompt: &str) -> Result<String, ProviderError> {
        let max_attempts = self.config.max_attempts.max(1);
        let temperature = Some(self.config.temperature);
        let mut attempt = 1;

        loop {
            let span = tracing::info_span!(
                "gen_ai",
                { GEN_AI_OPERATION_NAME } = OP_GENERATE_SKILL_TREE,
                { GEN_AI_PROVIDER_NAME } = self.provider.name(),
                { GEN_AI_REQUEST_MODEL } = self.provider.model(),
                { GEN_AI_REQUEST_MAX_TOKENS } = self.config.max_tokens,
                { GEN_AI_REQUEST_TEMPERATURE } = self.config.temperature,
                attempt
            );
            let call = self
                .provider
                .generate(prompt, self.config.max_tokens, temperature)
                .instrument(span);
            let result = match tokio::time::timeout(self.request_timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout {
                    secs: self.request_timeout.as_secs(),
                }),
            };

            let error = match result {
                Ok(content) => return Ok(content),
                Err(e) if e.is_transient() && attempt < max_attempts => e,
                Err(e) => return Err(e),
            };

            let Some(delay) = retry_delay(
                &error,
                self.config.retry_backoff_ms,
                self.config.max_backoff_ms,
                attempt,
            ) else {
                tracing::warn!(
                    attempt,
                    max_backoff_ms = self.config.max_backoff_ms,
                    error = %error,
                    "Provider retry hint exceeds backoff limit; not retrying"
                );
                return Err(error);
            };

            tracing::info!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "Transient provider error; retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Linear backoff, stretched to honor a provider's retry-after hint and
/// capped at `max_ms`. `None` when the hint alone exceeds the cap.
fn retry_delay(
    error: &ProviderError,
    backoff_ms: u64,
    max_ms: u64,
    attempt: u32,
) -> Option<Duration> {
    let hinted = match error {
        ProviderError::RateLimited {
            retry_after_ms: Some(ms),
        } => *ms,
        _ => 0,
    };
    if hinted > max_ms {
        return None;
    }
    let linear = backoff_ms.saturating_mul(u64::from(attempt));
    Some(Duration::from_millis(linear.max(hinted).min(max_ms)))
}
