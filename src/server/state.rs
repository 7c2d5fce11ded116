//! Application state shared across all request handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::checkin::{CheckinService, Summarizer, WebhookDispatcher};
use crate::config::CheckinConfig;
use crate::llm::{ChatModel, OpenAiChatClient, OpenAiConfig};
use crate::session::SessionStore;

/// Boxed startup error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state.
pub struct AppState {
    /// Check-in session lifecycle.
    pub service: CheckinService,
    /// Directory served at `/` and `/static`.
    pub static_dir: PathBuf,
}

impl AppState {
    /// Build the production state from configuration.
    ///
    /// # Errors
    /// Returns an error if the model or webhook HTTP clients cannot be created.
    pub fn new(config: CheckinConfig) -> Result<Arc<Self>, BoxError> {
        let client = OpenAiChatClient::new(OpenAiConfig {
            base_url: config.openai_base_url,
            api_key: config.api_key,
            model: config.model,
        })
        .map_err(|e| format!("Failed to create model client: {e}"))?;
        let dispatcher = WebhookDispatcher::new(config.webhook_url)
            .map_err(|e| format!("Failed to create webhook client: {e}"))?;
        tracing::info!(
            model = client.model(),
            webhook = %dispatcher.url(),
            "building check-in state"
        );

        let model: Arc<dyn ChatModel> = Arc::new(client);
        let summarizer = Summarizer::new(Arc::clone(&model));
        tracing::info!("Summary date fixed to {}", summarizer.date());

        let service = CheckinService::new(
            Arc::new(SessionStore::new()),
            model,
            summarizer,
            dispatcher,
        );

        Ok(Self::from_service(service, config.static_dir))
    }

    /// Wrap an already assembled service.
    #[must_use]
    pub fn from_service(service: CheckinService, static_dir: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            service,
            static_dir,
        })
    }
}
