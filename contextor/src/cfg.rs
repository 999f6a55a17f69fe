//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::history::DEFAULT_HISTORY_WINDOW;
use crate::prompt::DEFAULT_PERSONA;

pub const DEFAULT_KNOWLEDGE_FILE: &str = "training_examples.json";
pub const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;
pub const DEFAULT_TOP_K: usize = 3;

/// Config bag for the assistant. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct ContextorConfig {
    /// JSON array of knowledge entries.
    pub knowledge_path: PathBuf,
    /// Knowledge is re-read once more than this has elapsed since the last load.
    pub refresh_interval: Duration,
    /// Retrieved examples per prompt.
    pub top_k: usize,
    /// Conversation turns kept in the rolling window.
    pub history_window: usize,
    /// Standing instructions, sent to the model as its system instruction.
    pub persona: String,
}

impl ContextorConfig {
    /// Build from environment variables with sensible defaults.
    ///
    /// | var | default |
    /// |---|---|
    /// | `KNOWLEDGE_FILE` | `training_examples.json` |
    /// | `KNOWLEDGE_REFRESH_SECS` | `86400` |
    /// | `RETRIEVAL_TOP_K` | `3` |
    /// | `HISTORY_WINDOW` | `6` |
    ///
    /// Unparsable values fall back to the default.
    pub fn from_env() -> Self {
        Self {
            knowledge_path: PathBuf::from(env("KNOWLEDGE_FILE", DEFAULT_KNOWLEDGE_FILE)),
            refresh_interval: Duration::from_secs(parse(
                "KNOWLEDGE_REFRESH_SECS",
                DEFAULT_REFRESH_SECS,
            )),
            top_k: parse("RETRIEVAL_TOP_K", DEFAULT_TOP_K),
            history_window: parse("HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW),
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            knowledge_path: PathBuf::from(DEFAULT_KNOWLEDGE_FILE),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            top_k: DEFAULT_TOP_K,
            history_window: DEFAULT_HISTORY_WINDOW,
            persona: DEFAULT_PERSONA.to_string(),
        }
    }
}

fn env(k: &str, dflt: &str) -> String {
    std::env::var(k)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| dflt.to_string())
}

fn parse<T: std::str::FromStr>(k: &str, dflt: T) -> T {
    std::env::var(k)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(dflt)
}
