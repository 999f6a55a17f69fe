//! Retrieval: rank stored questions by lexical similarity to the query.

use crate::api_types::{KnowledgeEntry, ScoredEntry};
use crate::similarity::ratio;

/// Returns the `top_k` entries whose question is most similar to `query`.
///
/// Scores are computed case-insensitively. Ordering is by descending score;
/// equal scores keep the order of `entries`. No relevance floor is applied,
/// so the result always has `min(top_k, entries.len())` items.
///
/// # Example
/// ```
/// use contextor::{EntryKind, KnowledgeEntry, retrieve::rank};
/// let kb = vec![
///     KnowledgeEntry { id: 1, kind: EntryKind::Concise, question: "Best time to visit?".into(), answer: "".into() },
///     KnowledgeEntry { id: 2, kind: EntryKind::Concise, question: "How do I reach Gangtok?".into(), answer: "".into() },
/// ];
/// let hits = rank(&kb, "how do i get to gangtok", 1);
/// assert_eq!(hits[0].entry.id, 2);
/// ```
pub fn rank(entries: &[KnowledgeEntry], query: &str, top_k: usize) -> Vec<ScoredEntry> {
    let q: Vec<char> = query.to_lowercase().chars().collect();

    let mut scored: Vec<(f64, usize)> = entries
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            let question: Vec<char> = e.question.to_lowercase().chars().collect();
            (ratio(&q, &question), idx)
        })
        .collect();

    // `sort_by` is stable: ties stay in knowledge-file order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(top_k)
        .map(|(score, idx)| ScoredEntry {
            score,
            entry: entries[idx].clone(),
        })
        .collect()
}
