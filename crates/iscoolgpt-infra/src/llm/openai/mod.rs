//! OpenAI chat-completion strategy.
//!
//! Uses [`async_openai`] for type-safe request/response handling. The base
//! URL is configurable, so any OpenAI-compatible gateway works as well.
//! Every call is a single attempt: the client's retry backoff is disabled.

use std::time::Duration;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use secrecy::ExposeSecret;

use iscoolgpt_core::llm::prompt::{SYSTEM_PROMPT, build_prompt, resolve_max_tokens};
use iscoolgpt_core::llm::provider::LlmProvider;
use iscoolgpt_types::config::OpenAiSettings;
use iscoolgpt_types::llm::{GenerationResult, LlmError, ProviderKind, Query};

/// Chat-completion provider.
///
/// # API Key Security
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
/// When no key is configured the client is never built and every call fails
/// with [`LlmError::MissingCredential`] before touching the network.
pub struct OpenAiProvider {
    client: Option<Client<OpenAIConfig>>,
    model: String,
    default_max_tokens: u32,
    temperature: f64,
}

impl OpenAiProvider {
    pub fn new(settings: &OpenAiSettings, default_max_tokens: u32, temperature: f64) -> Self {
        let client = settings
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .map(|key| {
                let config = OpenAIConfig::new()
                    .with_api_key(key.expose_secret().to_string())
                    .with_api_base(settings.base_url());
                Client::with_config(config).with_backoff(no_retry())
            });

        Self {
            client,
            model: settings.model.clone(),
            default_max_tokens,
            temperature,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build a [`CreateChatCompletionRequest`]: system instruction plus the user prompt.
    fn build_request(&self, query: &Query) -> CreateChatCompletionRequest {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(SYSTEM_PROMPT.to_string()),
                name: None,
            }),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(build_prompt(query)),
                name: None,
            }),
        ];

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: Some(resolve_max_tokens(query, self.default_max_tokens)),
            temperature: Some(self.temperature as f32),
            ..Default::default()
        }
    }
}

/// A backoff that gives up immediately, so failed calls are never repeated.
fn no_retry() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, query: &Query) -> Result<GenerationResult, LlmError> {
        let client = self.client.as_ref().ok_or(LlmError::MissingCredential {
            provider: ProviderKind::OpenAi,
        })?;

        let request = self.build_request(query);
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| LlmError::transport(ProviderKind::OpenAi, e))?;

        let choice = response.choices.first().ok_or_else(|| {
            LlmError::transport(ProviderKind::OpenAi, "response contained no choices")
        })?;

        let answer = choice.message.content.clone().ok_or_else(|| {
            LlmError::transport(ProviderKind::OpenAi, "response contained no content")
        })?;

        Ok(GenerationResult {
            answer,
            tokens_used: response.usage.as_ref().map(|u| u.total_tokens),
            model: Some(response.model.clone()),
        })
    }
}
