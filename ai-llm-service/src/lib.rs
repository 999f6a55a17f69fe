//! Text-in/text-out client for hosted LLM providers.
//!
//! The crate exposes one service, [`llm_service::LlmService`], built from an
//! [`config::llm_model_config::LlmModelConfig`]. Callers depend on the
//! [`llm_service::TextGenerator`] trait so that the model can be swapped for a
//! stub in tests.

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::AiLlmError;
pub use llm_service::{GenerateFuture, LlmService, TextGenerator};
