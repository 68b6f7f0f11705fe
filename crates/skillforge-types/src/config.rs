//! Global configuration types for SkillForge.
//!
//! `GlobalConfig` represents the top-level `config.toml` that selects the
//! provider and tunes generation (language, depth, token limits, retries).

use serde::{Deserialize, Serialize};

use crate::llm::ProviderConfig;

/// Top-level configuration for the SkillForge service.
///
/// Loaded from `~/.skillforge/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Which provider to call and how.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Prompt and pipeline tuning.
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Tuning knobs for the generation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Default output language code when a request does not specify one.
    #[serde(default = "default_language")]
    pub language: String,
    /// Requested (not enforced) maximum tree depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    /// Ask the provider for resource links on every node.
    #[serde(default = "default_include_resources")]
    pub include_resources: bool,
    /// Output token limit sent with each provider request.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Total provider attempts per generation, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay between attempts; attempt `n` waits `n * retry_backoff_ms`.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Longest wait between attempts. A provider asking for more ends the retries.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_language() -> String {
    "zh".to_string()
}

fn default_max_depth() -> u32 {
    4
}

fn default_include_resources() -> bool {
    true
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_attempts() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    10_000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_depth: default_max_depth(),
            include_resources: default_include_resources(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_attempts: default_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}
