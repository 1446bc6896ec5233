//! Application state wiring the answer service together.
//!
//! AppState is shared by the CLI commands and the REST API handlers. Both
//! halves are read-only after startup, so cloning only bumps reference counts.

use std::path::Path;
use std::sync::Arc;

use iscoolgpt_core::llm::box_provider::BoxLlmProvider;
use iscoolgpt_core::service::answer::AnswerService;
use iscoolgpt_infra::config::load_settings;
use iscoolgpt_infra::llm::LlmDispatcher;
use iscoolgpt_types::config::Settings;
use tracing::{info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<AnswerService>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Load settings and wire the provider selected by them.
    ///
    /// A misconfigured provider is logged but not fatal: each request
    /// reports the fault itself.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let settings = Arc::new(load_settings(config_path).await?);
        let dispatcher = LlmDispatcher::new(settings.clone())?;

        match dispatcher.preflight() {
            Ok(kind) => info!(provider = %kind, model = ?dispatcher.model(), "LLM provider ready"),
            Err(e) => warn!(error = %e, "LLM provider is misconfigured, requests will fail"),
        }

        Ok(Self::from_parts(settings, BoxLlmProvider::new(dispatcher)))
    }

    /// Assemble state from already built parts.
    pub fn from_parts(settings: Arc<Settings>, provider: BoxLlmProvider) -> Self {
        Self {
            answer_service: Arc::new(AnswerService::new(provider)),
            settings,
        }
    }
}
