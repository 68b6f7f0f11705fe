//! Global configuration loader for SkillForge.
//!
//! Reads `config.toml` from the data directory (`~/.skillforge/` in
//! production) and deserializes it into [`GlobalConfig`]. Falls back to
//! sensible defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use skillforge_types::config::GlobalConfig;
use skillforge_types::llm::{ProviderConfig, ProviderType};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "SKILLFORGE_DATA_DIR";

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`] (offline preset provider).
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
///
/// Floors are applied in every case (see [`apply_floors`]).
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(mut config) => {
            apply_floors(&mut config);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Clamp values that must be at least one: attempts, timeout seconds, depth.
pub fn apply_floors(config: &mut GlobalConfig) {
    config.generation.max_attempts = config.generation.max_attempts.max(1);
    config.generation.max_depth = config.generation.max_depth.max(1);
    config.provider.request_timeout_secs = config.provider.request_timeout_secs.max(1);
}

/// Resolve the data directory.
///
/// Priority: `SKILLFORGE_DATA_DIR`, then `~/.skillforge`, then `./.skillforge`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".skillforge");
    }

    PathBuf::from(".skillforge")
}

/// Name of the environment variable holding the provider's API key.
///
/// `api_key_env` wins; otherwise a conventional name per provider.
/// Providers that need no key return `None`.
pub fn api_key_env_name(config: &ProviderConfig) -> Option<String> {
    if let Some(name) = &config.api_key_env {
        return Some(name.clone());
    }

    let default = match config.provider_type {
        ProviderType::OpenAiCompatible => match config.name.as_deref() {
            Some("deepseek") => "DEEPSEEK_API_KEY",
            _ => "OPENAI_API_KEY",
        },
        ProviderType::Anthropic => "ANTHROPIC_API_KEY",
        ProviderType::Volcano => "ARK_API_KEY",
        ProviderType::Ollama | ProviderType::Preset => return None,
    };
    Some(default.to_string())
}

/// Read the provider's API key from the environment.
///
/// Empty and non-Unicode values are treated as absent. The value is wrapped
/// in a [`SecretString`] immediately and never logged.
pub fn resolve_api_key(config: &ProviderConfig) -> Option<SecretString> {
    let var = api_key_env_name(config)?;
    match std::env::var(&var) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => {
            if config.provider_type.requires_api_key() {
                tracing::warn!(env_var = %var, "API key environment variable is not set");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.provider.provider_type, ProviderType::Preset);
        assert_eq!(config.generation.language, "zh");
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[provider]
provider_type = "volcano"
model = "doubao-pro"
request_timeout_secs = 45

[generation]
language = "en"
max_tokens = 8000
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.provider.provider_type, ProviderType::Volcano);
        assert_eq!(config.provider.model.as_deref(), Some("doubao-pro"));
        assert_eq!(config.provider.request_timeout_secs, 45);
        assert_eq!(config.generation.language, "en");
        assert_eq!(config.generation.max_tokens, 8000);
        assert_eq!(config.generation.max_attempts, 2);
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.provider.provider_type, ProviderType::Preset);
    }

    #[tokio::test]
    async fn load_global_config_applies_floors() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[provider]
provider_type = "local"
request_timeout_secs = 0

[generation]
max_attempts = 0
max_depth = 0
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.provider.provider_type, ProviderType::Ollama);
        assert_eq!(config.provider.request_timeout_secs, 1);
        assert_eq!(config.generation.max_attempts, 1);
        assert_eq!(config.generation.max_depth, 1);
    }

    #[test]
    fn api_key_env_name_defaults() {
        let mut config = ProviderConfig {
            provider_type: ProviderType::OpenAiCompatible,
            name: Some("deepseek".to_string()),
            ..ProviderConfig::default()
        };
        assert_eq!(api_key_env_name(&config).as_deref(), Some("DEEPSEEK_API_KEY"));

        config.name = None;
        assert_eq!(api_key_env_name(&config).as_deref(), Some("OPENAI_API_KEY"));

        config.api_key_env = Some("MY_KEY".to_string());
        assert_eq!(api_key_env_name(&config).as_deref(), Some("MY_KEY"));

        config.provider_type = ProviderType::Volcano;
        config.api_key_env = None;
        assert_eq!(api_key_env_name(&config).as_deref(), Some("ARK_API_KEY"));

        config.provider_type = ProviderType::Preset;
        assert_eq!(api_key_env_name(&config), None);
    }

    #[test]
    fn resolve_api_key_missing_env_var() {
        let config = ProviderConfig {
            provider_type: ProviderType::Anthropic,
            api_key_env: Some("SKILLFORGE_TEST_UNSET_KEY_7F3A".to_string()),
            ..ProviderConfig::default()
        };
        assert!(resolve_api_key(&config).is_none());
    }
}
