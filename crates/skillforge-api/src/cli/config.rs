//! `skillforge config`: print the effective configuration.

use std::path::Path;

use console::style;

use skillforge_infra::config::api_key_env_name;
use skillforge_types::config::GlobalConfig;

/// Print the loaded configuration. Only the name of the API key variable is
/// shown, together with whether it is set.
///
/// Works without a usable provider, so a missing key can be diagnosed here.
pub fn show_config(config: &GlobalConfig, data_dir: &Path, json: bool) -> anyhow::Result<()> {
    let key_env = api_key_env_name(&config.provider);
    let key_set = key_env
        .as_deref()
        .is_some_and(|var| std::env::var(var).is_ok_and(|v| !v.trim().is_empty()));

    if json {
        let value = serde_json::json!({
            "data_dir": data_dir.display().to_string(),
            "provider": config.provider,
            "generation": config.generation,
            "api_key_env": key_env,
            "api_key_set": key_set,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!(
        "  {}  {}",
        style("Config file:").bold(),
        style(data_dir.join("config.toml").display()).dim()
    );
    println!(
        "  {}  {}",
        style("Provider:").bold(),
        style(config.provider.display_name()).cyan()
    );
    if let Some(var) = &key_env {
        let status = if key_set {
            style("set").green()
        } else {
            style("missing").red()
        };
        println!("  {}  {var} ({status})", style("API key:").bold());
    }
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    println!();

    Ok(())
}
