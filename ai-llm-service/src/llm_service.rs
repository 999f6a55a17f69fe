//! Single-profile LLM service and the text generation seam.
//!
//! - Construct once at startup, wrap in `Arc`, and pass clones to dependents.
//! - The Gemini client (and its HTTP connection pool) is built eagerly, so
//!   configuration problems surface before the server starts listening.
//! - Consumers should depend on [`TextGenerator`] rather than on
//!   [`LlmService`] directly; tests plug in their own implementation.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::{LlmService, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ai_llm_service::AiLlmError> {
//!     let svc: Arc<dyn TextGenerator> = Arc::new(LlmService::from_env()?);
//!     let txt = svc.generate("Hello world", Some("Answer briefly.")).await?;
//!     println!("{txt}");
//!     Ok(())
//! }
//! ```

use std::{future::Future, pin::Pin};

use tracing::info;

use crate::{
    config::{default_config::config_from_env, llm_model_config::LlmModelConfig},
    error_handler::AiLlmError,
    services::gemini_service::GeminiService,
};

/// Boxed future returned by [`TextGenerator::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = Result<String, AiLlmError>> + Send + 'a>>;

/// Opaque text-in/text-out model call.
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` to the model, with `system` as standing instructions
    /// when given, and resolves to the generated text.
    fn generate<'a>(&'a self, prompt: &'a str, system: Option<&'a str>) -> GenerateFuture<'a>;
}

/// Shared service bound to one model configuration.
#[derive(Debug)]
pub struct LlmService {
    cfg: LlmModelConfig,
    client: GeminiService,
}

impl LlmService {
    /// Builds the provider client for `cfg`.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if the provider client rejects the config.
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let client = GeminiService::new(cfg.clone())?;

        info!(provider = %cfg.provider, model = %cfg.model, "LLM service ready");

        Ok(Self { cfg, client })
    }

    /// Reads the config from environment (see [`crate::config::default_config`])
    /// and builds the service.
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_from_env()?)
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    /// Generates text for a complete prompt, optionally under `system`
    /// instructions.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] on transport failures, non-2xx statuses (quota,
    /// auth, availability) and undecodable or empty responses.
    pub async fn generate_text(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, AiLlmError> {
        self.client.generate(prompt, system).await
    }
}

impl TextGenerator for LlmService {
    fn generate<'a>(&'a self, prompt: &'a str, system: Option<&'a str>) -> GenerateFuture<'a> {
        Box::pin(self.generate_text(prompt, system))
    }
}
