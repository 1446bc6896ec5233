//! Settings loader for IsCoolGPT.
//!
//! Reads an optional TOML file and then applies environment variable
//! overrides. Variables come from the process environment first and from an
//! optional `.env` file second. The result is built once at startup and
//! shared read-only.

use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;

use iscoolgpt_types::config::Settings;
use iscoolgpt_types::error::ConfigError;

/// Config file used when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "iscoolgpt.toml";

/// Dotenv file read from the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

pub const ENV_LLM_PROVIDER: &str = "LLM_PROVIDER";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_API_BASE: &str = "OPENAI_API_BASE";
pub const ENV_HUGGINGFACE_API_KEY: &str = "HUGGINGFACE_API_KEY";
pub const ENV_HUGGINGFACE_MODEL: &str = "HUGGINGFACE_MODEL";
pub const ENV_HUGGINGFACE_API_URL: &str = "HUGGINGFACE_API_URL";
pub const ENV_MAX_TOKENS: &str = "MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "TEMPERATURE";
pub const ENV_API_TITLE: &str = "API_TITLE";
pub const ENV_API_VERSION: &str = "API_VERSION";

/// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]), the process
/// environment and [`DEFAULT_ENV_FILE`].
pub async fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let mut settings = load_settings_file(path).await?;
    let dotenv = load_env_file(Path::new(DEFAULT_ENV_FILE))?;
    apply_env_overrides(
        &mut settings,
        with_fallback(|key| std::env::var(key).ok(), dotenv),
    )?;
    Ok(settings)
}

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing file yields no pairs.
pub fn load_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            tracing::debug!("No env file found at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    iter.map(|item| {
        item.map_err(|err| ConfigError::Parse {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    })
    .collect()
}

/// Look a key up in `primary`, then in `fallback`. Empty primary values fall through.
pub fn with_fallback<F>(
    primary: F,
    fallback: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| {
        primary(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| fallback.get(key).cloned())
    }
}

/// Load settings from a TOML file.
///
/// - If the file does not exist, returns [`Settings::default()`].
/// - If the file cannot be read or parsed, returns an error.
pub async fn load_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

/// Apply environment overrides through `lookup`. Empty values are ignored.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_API_TITLE) {
        settings.api_title = v;
    }
    if let Some(v) = get(ENV_API_VERSION) {
        settings.api_version = v;
    }
    if let Some(v) = get(ENV_LLM_PROVIDER) {
        settings.llm.provider = v;
    }
    if let Some(v) = get(ENV_MAX_TOKENS) {
        settings.llm.max_tokens = parse_env(ENV_MAX_TOKENS, &v)?;
    }
    if let Some(v) = get(ENV_TEMPERATURE) {
        settings.llm.temperature = parse_env(ENV_TEMPERATURE, &v)?;
    }

    if let Some(v) = get(ENV_OPENAI_API_KEY) {
        settings.llm.openai.api_key = Some(SecretString::from(v));
    }
    if let Some(v) = get(ENV_OPENAI_MODEL) {
        settings.llm.openai.model = v;
    }
    if let Some(v) = get(ENV_OPENAI_API_BASE) {
        settings.llm.openai.base_url = Some(v);
    }

    if let Some(v) = get(ENV_HUGGINGFACE_API_KEY) {
        settings.llm.huggingface.api_key = Some(SecretString::from(v));
    }
    if let Some(v) = get(ENV_HUGGINGFACE_MODEL) {
        settings.llm.huggingface.model = v;
    }
    if let Some(v) = get(ENV_HUGGINGFACE_API_URL) {
        settings.llm.huggingface.api_url = Some(v);
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}
