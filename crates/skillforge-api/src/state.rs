//! Application state wiring the generator and stores together.
//!
//! AppState holds the concrete instances used by both the CLI and the REST
//! API. The generator is built once from `config.toml` and shared behind an
//! `Arc`; the stores are the in-memory infra implementations.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use skillforge_core::generation::SkillTreeGenerator;
use skillforge_infra::config::resolve_api_key;
use skillforge_infra::llm::create_provider;
use skillforge_infra::store::{InMemoryPopularityCounter, InMemorySkillTreeRepository};
use skillforge_types::config::GlobalConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<SkillTreeGenerator>,
    pub trees: Arc<InMemorySkillTreeRepository>,
    pub popularity: Arc<InMemoryPopularityCounter>,
}

impl AppState {
    /// Build the provider named in `config` and wire it into a generator.
    pub fn from_config(config: &GlobalConfig) -> anyhow::Result<Self> {
        let api_key = resolve_api_key(&config.provider);
        let provider = create_provider(&config.provider, api_key).with_context(|| {
            format!(
                "failed to create provider '{}'",
                config.provider.display_name()
            )
        })?;

        let generator = SkillTreeGenerator::new(provider, config.generation.clone())
            .with_request_timeout(Duration::from_secs(config.provider.request_timeout_secs));

        tracing::info!(
            provider = %generator.provider_name(),
            model = %generator.provider_model(),
            "Application state initialized"
        );

        Ok(Self {
            generator: Arc::new(generator),
            trees: Arc::new(InMemorySkillTreeRepository::new()),
            popularity: Arc::new(InMemoryPopularityCounter::new()),
        })
    }
}

#[cfg(test)]
pub(crate) fn preset_state() -> AppState {
    let mut config = GlobalConfig::default();
    config.generation.retry_backoff_ms = 0;
    AppState::from_config(&config)
        .expect("preset provider needs no key")
}

#[cfg(test)]
mod tests {
    use skillforge_types::llm::ProviderType;

    use super::*;

    #[test]
    fn test_preset_config_builds_state() {
        let state = preset_state();
        assert_eq!(state.generator.provider_name(), "preset");
        assert!(state.trees.is_empty());
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let mut config = GlobalConfig::default();
        config.provider.provider_type = ProviderType::Anthropic;
        config.provider.api_key_env = Some("SKILLFORGE_TEST_UNSET_KEY_91C2".to_string());

        let err = AppState::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("anthropic"));
    }
}
