//! Typed error for the contextor crate.

use std::path::PathBuf;

use ai_llm_service::AiLlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The knowledge file could not be opened or read.
    #[error("failed to read knowledge file {}: {source}", .path.display())]
    KnowledgeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The knowledge file is not a JSON array of entries.
    #[error("malformed knowledge file {}: {source}", .path.display())]
    KnowledgeFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing (or renaming into place) the knowledge file failed.
    #[error("failed to write knowledge file {}: {source}", .path.display())]
    KnowledgeWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The highest id in the knowledge file leaves no room for another entry.
    #[error("knowledge file {} has no free id after {max}", .path.display())]
    IdOverflow { path: PathBuf, max: i64 },

    /// JSON serialization of the knowledge set (should be rare).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external model call failed (transport, quota, bad response).
    #[error(transparent)]
    Llm(#[from] AiLlmError),
}
