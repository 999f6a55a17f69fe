use contextor::{Feedback, KnowledgeEntry};
use serde::{Deserialize, Serialize};

/// Request payload for /feedback.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    /// The question the user asked.
    pub question: String,
    /// The answer the assistant gave.
    #[serde(default)]
    pub answer: String,
    /// The user's verdict and optional better answer.
    #[serde(default)]
    pub feedback: Feedback,
}

/// Response payload for /feedback.
#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    /// Whether a new knowledge entry was stored.
    pub accepted: bool,
    /// The stored entry, or `null` when the feedback was ignored.
    pub entry: Option<KnowledgeEntry>,
}
