//! Public API types re-used by external crates (e.g., the HTTP API layer).

use serde::{Deserialize, Serialize};

/// Length class of a stored answer.
///
/// Serialized as `"Concise"` / `"Expanded"` in the knowledge file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Concise,
    Expanded,
}

/// A stored question/answer pair used to ground generated replies.
///
/// # Example
/// ```
/// use contextor::{EntryKind, KnowledgeEntry};
/// let raw = r#"{"id": 7, "type": "Concise", "question": "Q?", "answer": "A."}"#;
/// let e: KnowledgeEntry = serde_json::from_str(raw).unwrap();
/// assert_eq!(e.kind, EntryKind::Concise);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub question: String,
    pub answer: String,
}

/// A knowledge entry together with its similarity to the query (`0.0..=1.0`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub score: f64,
    pub entry: KnowledgeEntry,
}

/// Author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when the history is rendered into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One message in the rolling chat history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// User verdict on a generated answer.
///
/// Both fields are optional on the wire; a record without `useful: true` and a
/// non-blank `preferred_answer` is ignored.
///
/// # Example
/// ```
/// use contextor::Feedback;
/// let f: Feedback = serde_json::from_str(r#"{"useful": true}"#).unwrap();
/// assert!(f.useful);
/// assert!(f.preferred_answer.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(default)]
    pub useful: bool,
    #[serde(default)]
    pub preferred_answer: Option<String>,
}
