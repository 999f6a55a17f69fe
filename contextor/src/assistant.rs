//! The assistant: knowledge, conversation window and model, wired together.

use std::sync::Arc;

use ai_llm_service::TextGenerator;
use tracing::{debug, info, instrument, warn};

use crate::api_types::{Feedback, KnowledgeEntry, Role, ScoredEntry};
use crate::cfg::ContextorConfig;
use crate::error::ContextorError;
use crate::feedback::{accepted_answer, entry_from_feedback};
use crate::history::ConversationHistory;
use crate::knowledge::KnowledgeBase;
use crate::prompt::build_prompt;
use crate::retrieve::rank;

/// One conversation with the knowledge-grounded model.
///
/// Methods take `&mut self`; callers sharing an assistant between tasks
/// must serialize access (the HTTP layer keeps it behind a mutex).
pub struct Assistant {
    cfg: ContextorConfig,
    knowledge: KnowledgeBase,
    history: ConversationHistory,
    llm: Arc<dyn TextGenerator>,
}

impl Assistant {
    /// Loads the knowledge file named in `cfg` and starts an empty conversation.
    ///
    /// # Errors
    /// Fails if the knowledge file is missing or malformed.
    pub async fn new(
        cfg: ContextorConfig,
        llm: Arc<dyn TextGenerator>,
    ) -> Result<Self, ContextorError> {
        let knowledge = KnowledgeBase::load(cfg.knowledge_path.clone()).await?;
        let history = ConversationHistory::new(cfg.history_window);
        Ok(Self {
            cfg,
            knowledge,
            history,
            llm,
        })
    }

    /// Top `top_k` knowledge entries by similarity to `query`.
    pub fn retrieve(&self, query: &str, top_k: usize) -> Vec<ScoredEntry> {
        rank(self.knowledge.entries(), query, top_k)
    }

    /// Answers `query` in the context of the running conversation.
    ///
    /// Steps: refresh knowledge if stale, record the user turn, retrieve
    /// `cfg.top_k` examples, build the prompt, call the model (persona as
    /// system instruction), record and return the trimmed reply.
    ///
    /// # Errors
    /// A stale knowledge file that no longer parses, or a failed model call.
    /// On a failed model call the user turn stays in the history.
    #[instrument(skip_all, fields(query_len = query.len()))]
    pub async fn generate_response(&mut self, query: &str) -> Result<String, ContextorError> {
        if self.knowledge.is_stale(self.cfg.refresh_interval) {
            self.knowledge.reload().await?;
        }

        self.history.push(Role::User, query);

        let retrieved = self.retrieve(query, self.cfg.top_k);
        debug!(
            hits = retrieved.len(),
            best_score = retrieved.first().map(|h| h.score).unwrap_or(0.0),
            "examples retrieved"
        );

        let prompt = build_prompt(&self.history, &retrieved, query);
        let persona = Some(self.cfg.persona.trim()).filter(|p| !p.is_empty());

        let reply = match self.llm.generate(&prompt, persona).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "model call failed");
                return Err(e.into());
            }
        };

        self.history.push(Role::Assistant, reply.clone());
        info!(
            reply_len = reply.len(),
            history = self.history.len(),
            "reply generated"
        );

        Ok(reply)
    }

    /// Stores the user's preferred answer to `question` as a new knowledge
    /// entry when the feedback marks it useful.
    ///
    /// Returns the stored entry, or `None` when the feedback was ignored.
    ///
    /// # Errors
    /// Writing the knowledge file failed (the in-memory set is left unchanged),
    /// or the highest stored id is `i64::MAX`.
    #[instrument(skip_all)]
    pub async fn feedback_loop(
        &mut self,
        question: &str,
        answer: &str,
        feedback: &Feedback,
    ) -> Result<Option<KnowledgeEntry>, ContextorError> {
        if accepted_answer(feedback).is_none() {
            debug!(useful = feedback.useful, "feedback ignored");
            return Ok(None);
        }
        let id = self.knowledge.next_id()?;
        let Some(entry) = entry_from_feedback(id, question, feedback) else {
            return Ok(None);
        };

        debug!(previous_answer_len = answer.len(), "storing preferred answer");
        self.knowledge.append(entry.clone()).await?;
        info!(id = entry.id, kind = ?entry.kind, "knowledge entry added from feedback");

        Ok(Some(entry))
    }

    /// Re-reads the knowledge file regardless of the refresh interval.
    pub async fn reload_knowledge(&mut self) -> Result<(), ContextorError> {
        self.knowledge.reload().await
    }

    /// Forgets the conversation so far.
    pub fn reset_history(&mut self) {
        self.history.clear();
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn config(&self) -> &ContextorConfig {
        &self.cfg
    }
}
