use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use ai_llm_service::{LlmService, TextGenerator};
use contextor::{Assistant, ContextorConfig};
use tokio::sync::Mutex;
use tracing::info;

use crate::error_handler::AppResult;

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// The single conversation served by this process. Requests are handled
    /// one at a time under this lock.
    pub assistant: Mutex<Assistant>,
    /// Provider name reported by `/health` (e.g. "gemini").
    pub llm_provider: String,
    /// Model name reported by `/health`.
    pub llm_model: String,
    /// Mirror of the assistant's counts, refreshed after every locked operation.
    knowledge_entries: AtomicUsize,
    history_turns: AtomicUsize,
}

/// Counts reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantCounts {
    pub knowledge_entries: usize,
    pub history_turns: usize,
}

impl AppState {
    pub fn new(
        assistant: Assistant,
        llm_provider: impl Into<String>,
        llm_model: impl Into<String>,
    ) -> Self {
        Self {
            knowledge_entries: AtomicUsize::new(assistant.knowledge().len()),
            history_turns: AtomicUsize::new(assistant.history().len()),
            assistant: Mutex::new(assistant),
            llm_provider: llm_provider.into(),
            llm_model: llm_model.into(),
        }
    }

    /// Copies the assistant's counts; call while holding the assistant lock.
    pub fn record(&self, assistant: &Assistant) {
        self.knowledge_entries
            .store(assistant.knowledge().len(), Ordering::Relaxed);
        self.history_turns
            .store(assistant.history().len(), Ordering::Relaxed);
    }

    /// Counts as of the last completed operation.
    pub fn counts(&self) -> AssistantCounts {
        AssistantCounts {
            knowledge_entries: self.knowledge_entries.load(Ordering::Relaxed),
            history_turns: self.history_turns.load(Ordering::Relaxed),
        }
    }

    /// Load the model config and the knowledge file from environment variables.
    ///
    /// Fails when the provider config is incomplete or the knowledge file
    /// cannot be read.
    pub async fn from_env() -> AppResult<Self> {
        let llm = LlmService::from_env()?;
        let provider = llm.config().provider.to_string();
        let model = llm.config().model.clone();

        let cfg = ContextorConfig::from_env();
        info!(
            knowledge = %cfg.knowledge_path.display(),
            provider = %provider,
            model = %model,
            "loading assistant"
        );

        let llm: Arc<dyn TextGenerator> = Arc::new(llm);
        let assistant = Assistant::new(cfg, llm).await?;

        Ok(Self::new(assistant, provider, model))
    }
}
