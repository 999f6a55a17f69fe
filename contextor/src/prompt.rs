//! Prompt builder: rolling history, retrieved examples, new question.
//!
//! The persona is not part of the prompt text; it travels to the model as a
//! separate system instruction.

use crate::api_types::ScoredEntry;
use crate::history::ConversationHistory;

/// Name the assistant answers under (prompt answer label, terminal chat).
pub const ASSISTANT_NAME: &str = "Monk AI";

/// Default persona, sent as the model's system instruction.
pub const DEFAULT_PERSONA: &str = "\
You are Monk AI, a polite and professional travel guide for Sikkim.
- Give concise answers by default (4-5 lines).
- Expand only if the user explicitly asks.
- Reference previous conversation context when needed.";

/// Renders retrieved entries as `Q: ..` / `A: ..` line pairs.
pub fn render_examples(retrieved: &[ScoredEntry]) -> String {
    retrieved
        .iter()
        .map(|h| format!("Q: {}\nA: {}", h.entry.question, h.entry.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the single text prompt sent to the model.
///
/// `history` is expected to already contain `question` as its latest user
/// turn; the question is repeated at the end so the model answers it.
///
/// # Example
/// ```
/// use contextor::{Role, history::ConversationHistory, prompt::build_prompt};
/// let mut h = ConversationHistory::default();
/// h.push(Role::User, "Hi");
/// let p = build_prompt(&h, &[], "Hi");
/// assert!(p.contains("User Question: Hi"));
/// ```
pub fn build_prompt(
    history: &ConversationHistory,
    retrieved: &[ScoredEntry],
    question: &str,
) -> String {
    format!(
        "Conversation so far:\n{history}\n\n\
         Retrieved knowledge from training data:\n{examples}\n\n\
         User Question: {question}\n\
         {ASSISTANT_NAME} Answer:\n",
        history = history.render(),
        examples = render_examples(retrieved),
    )
}
