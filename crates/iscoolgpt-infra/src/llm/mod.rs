//! LLM provider implementations.
//!
//! Contains the concrete strategies behind the [`LlmProvider`] trait defined
//! in `iscoolgpt-core` and the [`LlmDispatcher`] that routes every call to
//! the strategy named in the settings.

pub mod huggingface;
pub mod mock;
pub mod openai;

use std::sync::Arc;

use iscoolgpt_core::llm::provider::LlmProvider;
use iscoolgpt_types::config::Settings;
use iscoolgpt_types::llm::{GenerationResult, LlmError, ProviderKind, Query};

use self::huggingface::HuggingFaceProvider;
use self::mock::MockProvider;
use self::openai::OpenAiProvider;

/// Routes each call to the strategy selected by `settings.llm.provider`.
///
/// The provider name is resolved on every call rather than once at startup,
/// so a misconfigured name fails the request with
/// [`LlmError::UnsupportedProvider`] instead of being silently replaced.
pub struct LlmDispatcher {
    settings: Arc<Settings>,
    openai: OpenAiProvider,
    huggingface: HuggingFaceProvider,
    mock: MockProvider,
}

impl LlmDispatcher {
    /// Build every strategy from the shared settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for a remote strategy cannot be built.
    pub fn new(settings: Arc<Settings>) -> Result<Self, LlmError> {
        let llm = &settings.llm;
        let openai = OpenAiProvider::new(&llm.openai, llm.max_tokens, llm.temperature);
        let huggingface =
            HuggingFaceProvider::new(&llm.huggingface, llm.max_tokens, llm.temperature)?;

        Ok(Self {
            settings,
            openai,
            huggingface,
            mock: MockProvider::new(),
        })
    }

    /// Replace the mock strategy (e.g. to drop its simulated latency).
    pub fn with_mock(mut self, mock: MockProvider) -> Self {
        self.mock = mock;
        self
    }

    /// Resolve the configured provider name.
    pub fn selected(&self) -> Result<ProviderKind, LlmError> {
        let name = &self.settings.llm.provider;
        name.parse()
            .map_err(|_| LlmError::UnsupportedProvider(name.clone()))
    }

    /// Check the configuration without making a network call.
    ///
    /// Surfaces the same configuration faults a request would hit, so the
    /// server can warn about them at startup.
    pub fn preflight(&self) -> Result<ProviderKind, LlmError> {
        let kind = self.selected()?;
        let has_credential = match kind {
            ProviderKind::OpenAi => self.openai.has_credential(),
            ProviderKind::HuggingFace => self.huggingface.has_credential(),
            ProviderKind::Mock => true,
        };
        if has_credential {
            Ok(kind)
        } else {
            Err(LlmError::MissingCredential { provider: kind })
        }
    }

    /// Model identifier of the selected provider, if known up front.
    pub fn model(&self) -> Option<&str> {
        match self.selected().ok()? {
            ProviderKind::OpenAi => Some(self.openai.model()),
            ProviderKind::HuggingFace => Some(self.huggingface.model()),
            ProviderKind::Mock => Some(mock::MOCK_MODEL),
        }
    }
}

impl LlmProvider for LlmDispatcher {
    fn name(&self) -> &str {
        &self.settings.llm.provider
    }

    async fn generate(&self, query: &Query) -> Result<GenerationResult, LlmError> {
        match self.selected()? {
            ProviderKind::OpenAi => self.openai.generate(query).await,
            ProviderKind::HuggingFace => self.huggingface.generate(query).await,
            ProviderKind::Mock => self.mock.generate(query).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::{Matcher, Server};
    use secrecy::SecretString;

    use iscoolgpt_core::llm::box_provider::BoxLlmProvider;

    use super::*;

    fn settings(provider: &str, server: &Server) -> Settings {
        let mut settings = Settings::default();
        settings.llm.provider = provider.to_string();
        settings.llm.openai.base_url = Some(server.url());
        settings.llm.huggingface.api_url = Some(server.url());
        settings
    }

    fn dispatcher(settings: Settings) -> LlmDispatcher {
        LlmDispatcher::new(Arc::new(settings))
            .unwrap()
            .with_mock(MockProvider::new().with_latency(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_unknown_provider_fails_without_network_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let mut settings = settings("invalid_provider", &server);
        settings.llm.openai.api_key = Some(SecretString::from("sk-test".to_string()));
        settings.llm.huggingface.api_key = Some(SecretString::from("hf-test".to_string()));
        let dispatcher = dispatcher(settings);

        let err = dispatcher.generate(&Query::new("test question")).await.unwrap_err();
        match err {
            LlmError::UnsupportedProvider(name) => assert_eq!(name, "invalid_provider"),
            other => panic!("unexpected error: {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_mock_selected_by_default() {
        let server = Server::new_async().await;
        let dispatcher = dispatcher(settings("mock", &server));

        let result = dispatcher.generate(&Query::new("What is Docker?")).await.unwrap();
        assert_eq!(result.model.as_deref(), Some(mock::MOCK_MODEL));
        assert_eq!(dispatcher.name(), "mock");
    }

    #[tokio::test]
    async fn test_provider_name_is_case_insensitive() {
        let server = Server::new_async().await;
        let dispatcher = dispatcher(settings("MOCK", &server));
        assert_eq!(dispatcher.selected().unwrap(), ProviderKind::Mock);
    }

    #[tokio::test]
    async fn test_remote_providers_without_key_make_no_network_call() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        for (name, kind) in [
            ("openai", ProviderKind::OpenAi),
            ("huggingface", ProviderKind::HuggingFace),
        ] {
            let dispatcher = dispatcher(settings(name, &server));
            let err = dispatcher.generate(&Query::new("q")).await.unwrap_err();
            match err {
                LlmError::MissingCredential { provider } => assert_eq!(provider, kind),
                other => panic!("unexpected error: {other:?}"),
            }
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_huggingface_selected_calls_its_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/microsoft/DialoGPT-medium")
            .with_status(200)
            .with_body(r#"{"generated_text": "hi"}"#)
            .expect(1)
            .create_async()
            .await;

        let mut settings = settings("huggingface", &server);
        settings.llm.huggingface.api_key = Some(SecretString::from("hf-test".to_string()));
        let dispatcher = dispatcher(settings);

        let result = dispatcher.generate(&Query::new("hello")).await.unwrap();
        assert_eq!(result.answer, "hi");
        assert_eq!(result.model.as_deref(), Some("microsoft/DialoGPT-medium"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_preflight() {
        let server = Server::new_async().await;

        assert_eq!(
            dispatcher(settings("mock", &server)).preflight().unwrap(),
            ProviderKind::Mock
        );
        assert!(matches!(
            dispatcher(settings("openai", &server)).preflight(),
            Err(LlmError::MissingCredential {
                provider: ProviderKind::OpenAi
            })
        ));
        assert!(matches!(
            dispatcher(settings("gemini", &server)).preflight(),
            Err(LlmError::UnsupportedProvider(_))
        ));

        let mut with_key = settings("openai", &server);
        with_key.llm.openai.api_key = Some(SecretString::from("sk-test".to_string()));
        let dispatcher = dispatcher(with_key);
        assert_eq!(dispatcher.preflight().unwrap(), ProviderKind::OpenAi);
        assert_eq!(dispatcher.model(), Some("gpt-3.5-turbo"));
    }

    #[tokio::test]
    async fn test_dispatcher_boxes_into_object_safe_provider() {
        let provider = BoxLlmProvider::new(dispatcher(Settings::default()));
        assert_eq!(provider.name(), "mock");
        let result = provider.generate(&Query::new("What is AWS?")).await.unwrap();
        assert_eq!(result.model.as_deref(), Some(mock::MOCK_MODEL));
    }
}
