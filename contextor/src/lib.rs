//! Assistant core: knowledge-grounded chat over a flat Q/A file.
//!
//! Public API: [`Assistant`]. For each question it refreshes the knowledge
//! file when stale, ranks stored questions by lexical similarity, builds a
//! prompt from the persona, the rolling conversation window and the best
//! examples, and asks the model (any [`ai_llm_service::TextGenerator`]).
//! Useful feedback is appended to the knowledge file.

mod api_types;
mod assistant;
mod error;

pub mod cfg;
pub mod feedback;
pub mod history;
pub mod knowledge;
pub mod prompt;
pub mod retrieve;
pub mod similarity;

pub use api_types::{ConversationTurn, EntryKind, Feedback, KnowledgeEntry, Role, ScoredEntry};
pub use assistant::Assistant;
pub use cfg::ContextorConfig;
pub use error::ContextorError;
