//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined in
//! `skillforge-core`, one module per wire protocol, plus a provider factory
//! ([`create_provider`]) that constructs the right adapter from a
//! [`ProviderConfig`].
//!
//! [`LlmProvider`]: skillforge_core::llm::provider::LlmProvider

pub mod anthropic;
pub mod http;
pub mod ollama;
pub mod openai_compat;
pub mod preset;
pub mod volcano;

use std::time::Duration;

use secrecy::SecretString;

use skillforge_core::llm::box_provider::BoxLlmProvider;
use skillforge_types::llm::{ProviderConfig, ProviderError, ProviderType};

use self::anthropic::AnthropicProvider;
use self::ollama::OllamaProvider;
use self::openai_compat::OpenAiCompatibleProvider;
use self::preset::PresetProvider;
use self::volcano::VolcanoProvider;

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// Matches on the provider type to construct the appropriate concrete
/// adapter. Every HTTP adapter gets `config.request_timeout_secs` (at least
/// one second) as its client timeout.
///
/// # Errors
///
/// Returns [`ProviderError::AuthenticationFailed`] if the provider type
/// requires an API key but none is provided.
pub fn create_provider(
    config: &ProviderConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, ProviderError> {
    let timeout = Duration::from_secs(config.request_timeout_secs.max(1));

    let provider = match config.provider_type {
        ProviderType::OpenAiCompatible => {
            let key = api_key.ok_or(ProviderError::AuthenticationFailed)?;
            let model = config.model.as_deref();

            // Use base_url if specified, otherwise infer from provider name
            let provider = match config.base_url.as_deref() {
                Some(base_url) => {
                    OpenAiCompatibleProvider::new(openai_compat::config::OpenAiCompatConfig {
                        provider_name: config.display_name(),
                        base_url: base_url.to_string(),
                        api_key: key,
                        model: model.unwrap_or("gpt-3.5-turbo").to_string(),
                        timeout,
                    })?
                }
                None => match config.name.as_deref() {
                    Some("deepseek") => OpenAiCompatibleProvider::deepseek(key, model, timeout)?,
                    _ => OpenAiCompatibleProvider::openai(key, model, timeout)?,
                },
            };
            BoxLlmProvider::new(provider)
        }
        ProviderType::Anthropic => {
            let mut provider = AnthropicProvider::new(
                api_key.ok_or(ProviderError::AuthenticationFailed)?,
                config.model.clone(),
                timeout,
            )?;
            if let Some(base_url) = &config.base_url {
                provider = provider.with_base_url(base_url.clone());
            }
            BoxLlmProvider::new(provider)
        }
        ProviderType::Volcano => BoxLlmProvider::new(VolcanoProvider::new(
            api_key.ok_or(ProviderError::AuthenticationFailed)?,
            config.model.clone(),
            config.base_url.clone(),
            timeout,
        )?),
        ProviderType::Ollama => BoxLlmProvider::new(OllamaProvider::new(
            config.model.clone(),
            config.base_url.clone(),
            timeout,
        )?),
        ProviderType::Preset => BoxLlmProvider::new(PresetProvider::new()),
    };

    tracing::debug!(
        provider = provider.name(),
        model = provider.model(),
        "Created LLM provider"
    );
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider_type: ProviderType, name: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            provider_type,
            name: name.map(str::to_string),
            ..ProviderConfig::default()
        }
    }

    fn key() -> Option<SecretString> {
        Some(SecretString::from("test-key"))
    }

    #[test]
    fn test_create_provider_preset_by_default() {
        let provider = create_provider(&ProviderConfig::default(), None).unwrap();
        assert_eq!(provider.name(), "preset");
    }

    #[test]
    fn test_create_provider_deepseek_by_name() {
        let provider =
            create_provider(&config(ProviderType::OpenAiCompatible, Some("deepseek")), key())
                .unwrap();
        assert_eq!(provider.name(), "deepseek");
        assert_eq!(provider.model(), "deepseek-chat");
    }

    #[test]
    fn test_create_provider_openai_compatible_defaults_to_openai() {
        let provider =
            create_provider(&config(ProviderType::OpenAiCompatible, None), key()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_create_provider_openai_compatible_with_base_url() {
        let mut cfg = config(ProviderType::OpenAiCompatible, Some("custom-provider"));
        cfg.base_url = Some("https://custom.api.example.com/v1".to_string());
        cfg.model = Some("custom-model".to_string());
        let provider = create_provider(&cfg, key()).unwrap();
        assert_eq!(provider.name(), "custom-provider");
        assert_eq!(provider.model(), "custom-model");
    }

    #[test]
    fn test_create_provider_anthropic() {
        let provider = create_provider(&config(ProviderType::Anthropic, None), key()).unwrap();
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.model(), "claude-3-sonnet-20240229");
    }

    #[test]
    fn test_create_provider_volcano() {
        let provider = create_provider(&config(ProviderType::Volcano, None), key()).unwrap();
        assert_eq!(provider.name(), "volcano");
        assert_eq!(provider.model(), "doubao-seed-1-8-251228");
    }

    #[test]
    fn test_create_provider_ollama_needs_no_key() {
        let provider = create_provider(&config(ProviderType::Ollama, None), None).unwrap();
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_create_provider_missing_key() {
        for provider_type in [
            ProviderType::OpenAiCompatible,
            ProviderType::Anthropic,
            ProviderType::Volcano,
        ] {
            match create_provider(&config(provider_type, None), None) {
                Err(ProviderError::AuthenticationFailed) => {}
                Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
                Ok(_) => panic!("Expected error but got Ok"),
            }
        }
    }
}
