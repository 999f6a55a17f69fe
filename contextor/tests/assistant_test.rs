use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use ai_llm_service::{
    AiLlmError, GenerateFuture, LlmProvider, TextGenerator,
    error_handler::{ProviderError, ProviderErrorKind},
};
use contextor::{
    Assistant, ContextorConfig, ContextorError, EntryKind, Feedback, Role, knowledge::read_entries,
    prompt::DEFAULT_PERSONA,
};
use tempfile::TempDir;

/// Records every prompt and answers with a numbered reply (or fails).
#[derive(Default)]
struct StubLlm {
    prompts: Mutex<Vec<String>>,
    systems: Mutex<Vec<Option<String>>>,
    fail: bool,
}

impl StubLlm {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn last_system(&self) -> Option<String> {
        self.systems.lock().unwrap().last().cloned().flatten()
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl TextGenerator for StubLlm {
    fn generate<'a>(&'a self, prompt: &'a str, system: Option<&'a str>) -> GenerateFuture<'a> {
        Box::pin(async move {
            self.systems.lock().unwrap().push(system.map(str::to_string));
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            if self.fail {
                return Err(AiLlmError::from(ProviderError::new(
                    LlmProvider::Gemini,
                    ProviderErrorKind::EmptyResponse("quota exhausted".into()),
                )));
            }
            Ok(format!("  reply #{}  \n", prompts.len()))
        })
    }
}

const KNOWLEDGE: &str = r#"[
  {"id": 1, "type": "Concise", "question": "What is the best time to visit Sikkim?", "answer": "March to May and October to December."},
  {"id": 2, "type": "Concise", "question": "How do I reach Gangtok?", "answer": "Fly to Bagdogra, then drive about 4 hours."},
  {"id": 5, "type": "Expanded", "question": "Do I need a permit for Nathula Pass?", "answer": "Yes, an Inner Line Permit arranged through a registered agent."},
  {"id": 3, "type": "Concise", "question": "What local food should I try?", "answer": "Momos, thukpa and gundruk."}
]"#;

fn knowledge_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("training_examples.json");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

fn config(path: &Path) -> ContextorConfig {
    ContextorConfig {
        knowledge_path: path.to_path_buf(),
        ..ContextorConfig::default()
    }
}

async fn assistant(path: &Path, llm: Arc<StubLlm>) -> Assistant {
    Assistant::new(config(path), llm).await.unwrap()
}

#[tokio::test]
async fn missing_knowledge_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let res = Assistant::new(config(&dir.path().join("nope.json")), Arc::new(StubLlm::default())).await;
    assert!(matches!(res, Err(ContextorError::KnowledgeRead { .. })));
}

#[tokio::test]
async fn reply_is_trimmed_and_recorded() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let llm = Arc::new(StubLlm::default());
    let mut bot = assistant(&path, llm.clone()).await;

    let reply = bot.generate_response("How do I get to Gangtok?").await.unwrap();
    assert_eq!(reply, "reply #1");

    let turns: Vec<_> = bot.history().turns().cloned().collect();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].content, "How do I get to Gangtok?");
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[1].content, "reply #1");
}

#[tokio::test]
async fn prompt_contains_similar_example_and_history() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let llm = Arc::new(StubLlm::default());
    let mut bot = assistant(&path, llm.clone()).await;

    bot.generate_response("Hello there").await.unwrap();
    bot.generate_response("How do I get to Gangtok?").await.unwrap();

    let prompt = llm.last_prompt();
    assert!(prompt.contains("Q: How do I reach Gangtok?\nA: Fly to Bagdogra, then drive about 4 hours."));
    assert!(prompt.contains("User: Hello there\nAssistant: reply #1\nUser: How do I get to Gangtok?"));
    assert!(prompt.trim_end().ends_with("User Question: How do I get to Gangtok?\nMonk AI Answer:"));
    // top_k = 3 of the 4 entries.
    assert_eq!(prompt.matches("\nQ: ").count(), 3);
}

#[tokio::test]
async fn persona_is_sent_as_system_instruction() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let llm = Arc::new(StubLlm::default());
    let mut bot = assistant(&path, llm.clone()).await;

    bot.generate_response("Is Zuluk worth it?").await.unwrap();
    assert_eq!(llm.last_system().as_deref(), Some(DEFAULT_PERSONA));
    assert!(!llm.last_prompt().contains("travel guide for Sikkim"));

    let cfg = ContextorConfig {
        persona: "   ".into(),
        ..config(&path)
    };
    let llm = Arc::new(StubLlm::default());
    let mut bare = Assistant::new(cfg, llm.clone()).await.unwrap();
    bare.generate_response("Is Zuluk worth it?").await.unwrap();
    assert_eq!(llm.last_system(), None);
}

#[tokio::test]
async fn retrieval_puts_paraphrase_first() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let bot = assistant(&path, Arc::new(StubLlm::default())).await;

    let hits = bot.retrieve("How do I get to Gangtok?", 3);
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].entry.id, 2);
    assert_eq!(bot.retrieve("How do I get to Gangtok?", 3), hits);
    assert_eq!(bot.retrieve("anything", 10).len(), 4);
}

#[tokio::test]
async fn history_never_exceeds_window() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let mut bot = assistant(&path, Arc::new(StubLlm::default())).await;

    for i in 0..8 {
        bot.generate_response(&format!("question {i}")).await.unwrap();
        assert!(bot.history().len() <= 6);
    }
    let first = bot.history().turns().next().unwrap();
    assert_eq!(first.content, "question 5");
}

#[tokio::test]
async fn model_failure_propagates_and_keeps_user_turn() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let mut bot = assistant(&path, Arc::new(StubLlm::failing())).await;

    let err = bot.generate_response("Is Yumthang open?").await.unwrap_err();
    assert!(matches!(err, ContextorError::Llm(_)));
    assert!(err.to_string().contains("quota exhausted"));

    assert_eq!(bot.history().len(), 1);
    assert_eq!(bot.history().turns().next().unwrap().role, Role::User);
}

#[tokio::test(start_paused = true)]
async fn knowledge_reloads_after_refresh_interval() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let llm = Arc::new(StubLlm::default());
    let cfg = ContextorConfig {
        refresh_interval: Duration::from_secs(3600),
        ..config(&path)
    };
    let mut bot = Assistant::new(cfg, llm.clone()).await.unwrap();

    std::fs::write(
        &path,
        r#"[{"id": 1, "type": "Concise", "question": "Is Yuksom worth a visit?", "answer": "Yes, it is the trailhead to Dzongri."}]"#,
    )
    .unwrap();

    bot.generate_response("Is Yuksom worth it?").await.unwrap();
    assert_eq!(bot.knowledge().len(), 4);
    assert!(!llm.last_prompt().contains("Dzongri"));

    tokio::time::advance(Duration::from_secs(3601)).await;

    bot.generate_response("Is Yuksom worth it?").await.unwrap();
    assert_eq!(bot.knowledge().len(), 1);
    assert!(llm.last_prompt().contains("Q: Is Yuksom worth a visit?"));
}

#[tokio::test(start_paused = true)]
async fn malformed_file_on_refresh_is_reported() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let cfg = ContextorConfig {
        refresh_interval: Duration::from_secs(10),
        ..config(&path)
    };
    let mut bot = Assistant::new(cfg, Arc::new(StubLlm::default())).await.unwrap();

    std::fs::write(&path, "{ not json").unwrap();
    tokio::time::advance(Duration::from_secs(11)).await;

    let err = bot.generate_response("hello").await.unwrap_err();
    assert!(matches!(err, ContextorError::KnowledgeFormat { .. }));
    assert_eq!(bot.knowledge().len(), 4);
    assert!(bot.history().is_empty());
}

#[tokio::test]
async fn useful_feedback_appends_and_persists_entry() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let mut bot = assistant(&path, Arc::new(StubLlm::default())).await;

    let long_answer = vec!["trek"; 51].join(" ");
    let fb = Feedback {
        useful: true,
        preferred_answer: Some(long_answer.clone()),
    };
    let entry = bot
        .feedback_loop("Tell me about Goechala", "old answer", &fb)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.id, 6);
    assert_eq!(entry.kind, EntryKind::Expanded);

    let short = Feedback {
        useful: true,
        preferred_answer: Some("Carry warm layers.".into()),
    };
    let entry = bot
        .feedback_loop("What to pack?", "old answer", &short)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.id, 7);
    assert_eq!(entry.kind, EntryKind::Concise);

    let on_disk = read_entries(&path).await.unwrap();
    assert_eq!(on_disk.len(), 6);
    assert_eq!(on_disk[4].question, "Tell me about Goechala");
    assert_eq!(on_disk[4].answer, long_answer);
    assert_eq!(on_disk, bot.knowledge().entries());

    let hits = bot.retrieve("what should i pack", 1);
    assert_eq!(hits[0].entry.id, 7);
}

#[tokio::test]
async fn incomplete_feedback_is_ignored() {
    let (_dir, path) = knowledge_file(KNOWLEDGE);
    let mut bot = assistant(&path, Arc::new(StubLlm::default())).await;
    let before = std::fs::read_to_string(&path).unwrap();

    let ignored = [
        Feedback::default(),
        Feedback {
            useful: true,
            preferred_answer: None,
        },
        Feedback {
            useful: false,
            preferred_answer: Some("Better answer".into()),
        },
    ];
    for fb in &ignored {
        assert!(bot.feedback_loop("q", "a", fb).await.unwrap().is_none());
    }

    assert_eq!(bot.knowledge().len(), 4);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[tokio::test]
async fn feedback_at_highest_id_fails_without_touching_file() {
    let full = format!(
        r#"[{{"id": {}, "type": "Concise", "question": "Where is Ravangla?", "answer": "South Sikkim."}}]"#,
        i64::MAX
    );
    let (_dir, path) = knowledge_file(&full);
    let mut bot = assistant(&path, Arc::new(StubLlm::default())).await;

    let fb = Feedback {
        useful: true,
        preferred_answer: Some("Home of the Buddha Park.".into()),
    };
    let err = bot.feedback_loop("What is in Ravangla?", "a", &fb).await.unwrap_err();
    assert!(matches!(err, ContextorError::IdOverflow { .. }));
    assert_eq!(bot.knowledge().len(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), full);

    // Ignored feedback never needs an id.
    assert!(bot.feedback_loop("q", "a", &Feedback::default()).await.unwrap().is_none());
}
