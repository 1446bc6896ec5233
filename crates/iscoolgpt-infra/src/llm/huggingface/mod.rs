//! Hugging Face text-generation strategy.
//!
//! Sends `POST {api_url}/{model}` to the Inference API with a bearer token
//! and normalizes whatever JSON shape the model returns. The backend does
//! not reliably report usage, so `tokens_used` is always absent.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use iscoolgpt_core::llm::prompt::{build_prompt, resolve_max_tokens};
use iscoolgpt_core::llm::provider::LlmProvider;
use iscoolgpt_types::config::HuggingFaceSettings;
use iscoolgpt_types::llm::{GenerationResult, LlmError, ProviderKind, Query};

use self::types::{TextGenerationParameters, TextGenerationRequest, TextGenerationResponse};

/// Text-generation provider.
///
/// The API key is stored as a [`SecretString`] and only exposed when
/// building the `Authorization` header.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    api_url: String,
    model: String,
    default_max_tokens: u32,
    temperature: f64,
}

impl HuggingFaceProvider {
    /// Per-request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(
        settings: &HuggingFaceSettings,
        default_max_tokens: u32,
        temperature: f64,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| LlmError::transport(ProviderKind::HuggingFace, e))?;

        let api_key = settings
            .api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
            .map(|key| SecretString::from(key.expose_secret().to_string()));

        Ok(Self {
            client,
            api_key,
            api_url: settings.api_url().trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            default_max_tokens,
            temperature,
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url, self.model)
    }

    fn build_request(&self, query: &Query) -> TextGenerationRequest {
        TextGenerationRequest {
            inputs: build_prompt(query),
            parameters: TextGenerationParameters {
                max_new_tokens: resolve_max_tokens(query, self.default_max_tokens),
                temperature: self.temperature,
                return_full_text: false,
            },
        }
    }
}

// HuggingFaceProvider intentionally does NOT derive Debug.

/// Error body text, or a note on why it could not be read.
fn body_or_read_error(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|e| format!("<unreadable body: {e}>"))
}

impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(&self, query: &Query) -> Result<GenerationResult, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingCredential {
            provider: ProviderKind::HuggingFace,
        })?;

        let url = self.endpoint();
        debug!(%url, "calling text-generation endpoint");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&self.build_request(query))
            .send()
            .await
            .map_err(|e| {
                LlmError::transport(ProviderKind::HuggingFace, format!("HTTP request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = body_or_read_error(response.text().await);
            return Err(LlmError::status(
                ProviderKind::HuggingFace,
                status.as_u16(),
                body,
            ));
        }

        let parsed: TextGenerationResponse = response.json().await.map_err(|e| {
            LlmError::transport(
                ProviderKind::HuggingFace,
                format!("failed to parse response: {e}"),
            )
        })?;

        Ok(GenerationResult {
            answer: parsed.into_text(),
            tokens_used: None,
            model: Some(self.model.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iscoolgpt_types::llm::CallFailure;
    use mockito::Matcher;

    fn settings(api_key: Option<&str>, api_url: &str) -> HuggingFaceSettings {
        HuggingFaceSettings {
            api_key: api_key.map(|k| SecretString::from(k.to_string())),
            model: "gpt2".to_string(),
            api_url: Some(api_url.to_string()),
        }
    }

    #[test]
    fn test_endpoint_joins_base_and_model() {
        let provider =
            HuggingFaceProvider::new(&settings(Some("hf"), "http://hf.local/models/"), 500, 0.7)
                .unwrap();
        assert_eq!(provider.endpoint(), "http://hf.local/models/gpt2");
    }

    #[test]
    fn test_default_api_url() {
        let settings = HuggingFaceSettings::default();
        let provider = HuggingFaceProvider::new(&settings, 500, 0.7).unwrap();
        assert_eq!(
            provider.endpoint(),
            "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium"
        );
        assert!(!provider.has_credential());
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(&settings(None, &server.url()), 500, 0.7).unwrap();
        let err = provider.generate(&Query::new("test question")).await.unwrap_err();

        assert!(matches!(
            err,
            LlmError::MissingCredential {
                provider: ProviderKind::HuggingFace
            }
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_sends_expected_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/gpt2")
            .match_header("authorization", "Bearer hf-key")
            .match_body(Matcher::Json(serde_json::json!({
                "inputs": "Context: beginner\n\nQuestion: What is REST?",
                "parameters": {
                    "max_new_tokens": 64,
                    "temperature": 0.7,
                    "return_full_text": false
                }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text": "  REST is an architectural style.\n"}]"#)
            .expect(1)
            .create_async()
            .await;

        let provider =
            HuggingFaceProvider::new(&settings(Some("hf-key"), &server.url()), 500, 0.7).unwrap();
        let query = Query::new("What is REST?")
            .with_context("beginner")
            .with_max_output_tokens(64);
        let result = provider.generate(&query).await.unwrap();

        assert_eq!(result.answer, "REST is an architectural style.");
        assert_eq!(result.tokens_used, None);
        assert_eq!(result.model.as_deref(), Some("gpt2"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_object_response_without_text_is_stringified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/gpt2")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let provider =
            HuggingFaceProvider::new(&settings(Some("hf-key"), &server.url()), 500, 0.7).unwrap();
        let result = provider.generate(&Query::new("q")).await.unwrap();
        assert_eq!(result.answer, "{}");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/gpt2")
            .with_status(503)
            .with_body(r#"{"error":"Model gpt2 is currently loading"}"#)
            .expect(1)
            .create_async()
            .await;

        let provider =
            HuggingFaceProvider::new(&settings(Some("hf-key"), &server.url()), 500, 0.7).unwrap();
        let err = provider.generate(&Query::new("q")).await.unwrap_err();

        match err {
            LlmError::ProviderCall {
                provider,
                cause: CallFailure::Status { status, body },
            } => {
                assert_eq!(provider, ProviderKind::HuggingFace);
                assert_eq!(status, 503);
                assert!(body.contains("currently loading"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // A single attempt, no retry.
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreadable_error_body_keeps_read_failure() {
        let read_error = reqwest::get("http://127.0.0.1:1").await.unwrap_err();
        let body = body_or_read_error(Err(read_error));
        assert!(body.starts_with("<unreadable body: "));

        assert_eq!(body_or_read_error(Ok("loading".to_string())), "loading");
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/gpt2")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let provider =
            HuggingFaceProvider::new(&settings(Some("hf-key"), &server.url()), 500, 0.7).unwrap();
        let err = provider.generate(&Query::new("q")).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::ProviderCall {
                cause: CallFailure::Transport(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 1.
        let provider =
            HuggingFaceProvider::new(&settings(Some("hf-key"), "http://127.0.0.1:1"), 500, 0.7)
                .unwrap();
        let err = provider.generate(&Query::new("q")).await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::ProviderCall {
                provider: ProviderKind::HuggingFace,
                cause: CallFailure::Transport(_),
            }
        ));
    }
}
