//! Turning user feedback into new knowledge entries.

use crate::api_types::{EntryKind, Feedback, KnowledgeEntry};

/// Answers with more words than this are stored as [`EntryKind::Expanded`].
pub const EXPANDED_MIN_WORDS: usize = 50;

/// Classifies an answer by its whitespace-separated word count.
///
/// # Example
/// ```
/// use contextor::{EntryKind, feedback::classify_answer};
/// assert_eq!(classify_answer("Short and sweet."), EntryKind::Concise);
/// ```
pub fn classify_answer(answer: &str) -> EntryKind {
    if answer.split_whitespace().count() > EXPANDED_MIN_WORDS {
        EntryKind::Expanded
    } else {
        EntryKind::Concise
    }
}

/// The preferred answer, if the feedback qualifies for storage.
///
/// Qualifies when `useful` is set and `preferred_answer` is present and not
/// blank.
pub fn accepted_answer(feedback: &Feedback) -> Option<&str> {
    if !feedback.useful {
        return None;
    }
    feedback
        .preferred_answer
        .as_deref()
        .filter(|a| !a.trim().is_empty())
}

/// Builds the entry to store for `question`, or `None` if the feedback is
/// ignored.
pub fn entry_from_feedback(id: i64, question: &str, feedback: &Feedback) -> Option<KnowledgeEntry> {
    let answer = accepted_answer(feedback)?;
    Some(KnowledgeEntry {
        id,
        kind: classify_answer(answer),
        question: question.to_string(),
        answer: answer.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn fifty_words_is_concise_fifty_one_is_expanded() {
        assert_eq!(classify_answer(&words(50)), EntryKind::Concise);
        assert_eq!(classify_answer(&words(51)), EntryKind::Expanded);
        assert_eq!(classify_answer(""), EntryKind::Concise);
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let spaced = format!("  {}  \n\t", words(50).replace(' ', "   "));
        assert_eq!(classify_answer(&spaced), EntryKind::Concise);
    }

    #[test]
    fn ignores_feedback_without_useful_flag_or_answer() {
        let not_useful = Feedback {
            useful: false,
            preferred_answer: Some("Take the ropeway.".into()),
        };
        assert!(entry_from_feedback(9, "q", &not_useful).is_none());

        let no_answer = Feedback {
            useful: true,
            preferred_answer: None,
        };
        assert!(entry_from_feedback(9, "q", &no_answer).is_none());

        let blank = Feedback {
            useful: true,
            preferred_answer: Some("   ".into()),
        };
        assert!(entry_from_feedback(9, "q", &blank).is_none());
    }

    #[test]
    fn builds_entry_from_useful_feedback() {
        let fb = Feedback {
            useful: true,
            preferred_answer: Some(words(60)),
        };
        let e = entry_from_feedback(12, "Tell me about Pelling", &fb).unwrap();
        assert_eq!(e.id, 12);
        assert_eq!(e.kind, EntryKind::Expanded);
        assert_eq!(e.question, "Tell me about Pelling");
    }
}
