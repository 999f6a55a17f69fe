//! Default LLM config loaded strictly from environment variables.
//!
//! [`config_from_env`] checks `LLM_KIND` and builds the Gemini config. Every
//! value is validated here, so a misconfigured deployment fails at startup
//! instead of on the first chat request.
//!
//! # Environment variables
//!
//! - `LLM_KIND`         = provider kind (`gemini`, the default and only one)
//! - `GEMINI_API_KEY`   = credential (mandatory)
//! - `GEMINI_MODEL`     = model (default `gemini-1.5-flash`)
//! - `GEMINI_URL`       = base URL (default `https://generativelanguage.googleapis.com`)
//! - `LLM_MAX_TOKENS`   = optional max output tokens (u32)
//! - `LLM_TEMPERATURE`  = optional sampling temperature (0.0..=2.0)
//! - `LLM_TOP_P`        = optional nucleus sampling cutoff (0.0..=1.0)
//! - `LLM_TIMEOUT_SECS` = optional request timeout (u64, default 60)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_f32, env_opt_u32, env_opt_u64, env_or, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Builds the model config for the provider named by `LLM_KIND`.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for any `LLM_KIND` other than Gemini
/// - whatever [`config_gemini`] reports
pub fn config_from_env() -> Result<LlmModelConfig, AiLlmError> {
    let kind: LlmProvider = env_or("LLM_KIND", "gemini").parse()?;
    match kind {
        LlmProvider::Gemini => config_gemini(),
    }
}

/// Constructs a config for the hosted **Gemini** model.
///
/// # Env
/// - `GEMINI_API_KEY` (required)
/// - `GEMINI_MODEL`, `GEMINI_URL` (optional)
/// - sampling knobs, see [`Sampling::from_env`]
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GEMINI_API_KEY")?;
    let endpoint = env_or("GEMINI_URL", DEFAULT_GEMINI_URL);
    validate_http_endpoint("GEMINI_URL", &endpoint)?;
    let model = env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    if model.trim().is_empty() {
        return Err(ConfigError::EmptyModel.into());
    }

    let sampling = Sampling::from_env()?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens: sampling.max_tokens,
        temperature: sampling.temperature,
        top_p: sampling.top_p,
        timeout_secs: Some(sampling.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Provider-independent generation knobs.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl Sampling {
    /// Reads `LLM_MAX_TOKENS`, `LLM_TEMPERATURE`, `LLM_TOP_P` and
    /// `LLM_TIMEOUT_SECS`, then [`validate`](Self::validate)s them.
    pub fn from_env() -> Result<Self, AiLlmError> {
        let sampling = Self {
            max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
            temperature: env_opt_f32("LLM_TEMPERATURE")?,
            top_p: env_opt_f32("LLM_TOP_P")?,
            timeout_secs: env_opt_u64("LLM_TIMEOUT_SECS")?,
        };
        sampling.validate()?;
        Ok(sampling)
    }

    /// Temperature must lie in `0.0..=2.0`, top_p in `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), AiLlmError> {
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", "expected 0.0..=2.0", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", "expected 0.0..=1.0", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_ranges_are_enforced() {
        let ok = Sampling {
            temperature: Some(0.7),
            top_p: Some(0.95),
            ..Sampling::default()
        };
        assert!(ok.validate().is_ok());

        let hot = Sampling {
            temperature: Some(2.5),
            ..Sampling::default()
        };
        assert!(hot.validate().unwrap_err().to_string().contains("temperature"));

        let wide = Sampling {
            top_p: Some(1.5),
            ..Sampling::default()
        };
        assert!(wide.validate().unwrap_err().to_string().contains("top_p"));
    }

    #[test]
    fn top_p_is_read_from_env() {
        // Only this test touches LLM_TOP_P.
        unsafe { std::env::set_var("LLM_TOP_P", "0.9") };
        assert_eq!(Sampling::from_env().unwrap().top_p, Some(0.9));

        unsafe { std::env::set_var("LLM_TOP_P", "1.5") };
        assert!(Sampling::from_env().is_err());

        unsafe { std::env::remove_var("LLM_TOP_P") };
        assert_eq!(Sampling::from_env().unwrap().top_p, None);
    }
}
