// Configuration loader
// Loads ~/.companion/config.toml (or $COMPANION_CONFIG), then environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;

pub const CONFIG_PATH_ENV: &str = "COMPANION_CONFIG";

/// Load configuration from the config file and environment.
///
/// A missing file is not an error: the service runs on defaults and chat
/// requests must then carry their own `apiKey`.
pub fn load_config() -> Result<Config> {
    let path = std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(default_config_path);

    let config = match path {
        Some(path) if path.exists() => load_config_from(&path)?,
        Some(path) => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        }
        None => Config::default(),
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok());
    config
        .validate()
        .context("Configuration validation failed")?;
    Ok(config)
}

/// `~/.companion/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".companion").join("config.toml"))
}

/// Parse a TOML config file
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Apply `ANTHROPIC_API_KEY`, `STRIPE_SECRET_KEY` and `COMPANION_BIND`
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(api_key) = get("ANTHROPIC_API_KEY") {
        config.anthropic.api_key = api_key;
    }
    if let Some(secret) = get("STRIPE_SECRET_KEY") {
        config.stripe.secret_key = secret;
    }
    if let Some(bind) = get("COMPANION_BIND") {
        config.server.bind_address = bind;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
active_companion = "luna"

[server]
bind_address = "0.0.0.0:9000"

[anthropic]
model = "claude-haiku"
max_tokens = 300
"#
        )
        .unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:9000");
        assert_eq!(config.anthropic.model, "claude-haiku");
        assert_eq!(config.anthropic.max_tokens, 300);
        assert_eq!(config.active_companion.as_deref(), Some("luna"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[anthropic\nmodel = ").unwrap();
        let err = load_config_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"), "{err}");
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = [
            ("ANTHROPIC_API_KEY", "sk-env"),
            ("STRIPE_SECRET_KEY", "sk_test_env"),
            ("COMPANION_BIND", ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.anthropic.api_key = "sk-file".into();
        let config = apply_env_overrides(config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.anthropic.api_key, "sk-env");
        assert_eq!(config.stripe.secret_key, "sk_test_env");
        // Empty values are ignored
        assert_eq!(config.server.bind_address, Config::default().server.bind_address);
    }
}
