//! Settings model for IsCoolGPT.
//!
//! `Settings` is constructed once at startup (see `iscoolgpt_infra::config`)
//! and shared read-only for the lifetime of the process. Every field has a
//! default, so an empty TOML document is a valid configuration.

use secrecy::SecretString;
use serde::Deserialize;

/// Default Hugging Face Inference API base URL.
pub const DEFAULT_HUGGINGFACE_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Top-level process settings.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Title reported by `GET /`.
    #[serde(default = "default_api_title")]
    pub api_title: String,

    /// Version reported by `GET /`.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Provider selection and per-provider settings.
    #[serde(default)]
    pub llm: LlmSettings,
}

fn default_api_title() -> String {
    "IsCoolGPT API".to_string()
}

fn default_api_version() -> String {
    "1.0.0".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_title: default_api_title(),
            api_version: default_api_version(),
            llm: LlmSettings::default(),
        }
    }
}

/// Provider selection plus generation defaults.
#[derive(Debug, Deserialize)]
pub struct LlmSettings {
    /// Selected provider name. Validated on every call, not at load time.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Output token budget used when the caller does not supply one.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature for every remote call.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default)]
    pub openai: OpenAiSettings,

    #[serde(default)]
    pub huggingface: HuggingFaceSettings,
}

fn default_provider() -> String {
    "mock".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            openai: OpenAiSettings::default(),
            huggingface: HuggingFaceSettings::default(),
        }
    }
}

/// Chat-completion provider settings.
#[derive(Debug, Deserialize)]
pub struct OpenAiSettings {
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Override the API base URL (proxies, compatible gateways, tests).
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: None,
        }
    }
}

impl OpenAiSettings {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_OPENAI_API_BASE)
    }
}

/// Text-generation provider settings.
#[derive(Debug, Deserialize)]
pub struct HuggingFaceSettings {
    #[serde(default)]
    pub api_key: Option<SecretString>,

    #[serde(default = "default_huggingface_model")]
    pub model: String,

    #[serde(default)]
    pub api_url: Option<String>,
}

fn default_huggingface_model() -> String {
    "microsoft/DialoGPT-medium".to_string()
}

impl Default for HuggingFaceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_huggingface_model(),
            api_url: None,
        }
    }
}

impl HuggingFaceSettings {
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_HUGGINGFACE_API_URL)
    }
}
