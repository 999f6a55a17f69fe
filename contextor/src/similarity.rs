//! Lexical similarity between a query and stored questions.
//!
//! Implements Ratcliff/Obershelp "gestalt" matching: find the longest common
//! block, recurse on the pieces left and right of it, and score
//! `2 * matched / (len(a) + len(b))`. Matching runs over Unicode scalar values.
//!
//! Tie break for equally long blocks: the one starting earliest in `a`, then
//! earliest in `b`. When `b` has at least [`AUTOJUNK_MIN_LEN`] characters,
//! characters occurring in more than 1% of it (plus one) cannot start a
//! match; they can still extend one.

use std::collections::{HashMap, HashSet};

/// Minimum length of `b` before popular characters are ignored.
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// Case-insensitive similarity ratio in `0.0..=1.0`.
///
/// # Example
/// ```
/// use contextor::similarity::similarity;
/// assert_eq!(similarity("Gangtok", "GANGTOK"), 1.0);
/// assert!(similarity("How do I get to Gangtok?", "How do I reach Gangtok?") > 0.8);
/// ```
pub fn similarity(query: &str, question: &str) -> f64 {
    let a: Vec<char> = query.to_lowercase().chars().collect();
    let b: Vec<char> = question.to_lowercase().chars().collect();
    ratio(&a, &b)
}

/// Case-sensitive ratio over pre-split characters.
///
/// Two empty sequences are identical (`1.0`).
pub fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

/// Number of characters covered by all matching blocks.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let popular = popular_chars(b);
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, &popular, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows.
fn longest_match(
    a: &[char],
    b: &[char],
    popular: &HashSet<char>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

    // run[j - blo + 1] = length of the match ending at (i, j); run[0] stays 0.
    let width = bhi - blo + 1;
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];

    for i in alo..ahi {
        cur.iter_mut().for_each(|v| *v = 0);
        for j in blo..bhi {
            if a[i] != b[j] || popular.contains(&b[j]) {
                continue;
            }
            let k = prev[j - blo] + 1;
            cur[j - blo + 1] = k;
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    // Popular characters never start a match but may extend one.
    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_k += 1;
    }
    while best_i + best_k < ahi && best_j + best_k < bhi && a[best_i + best_k] == b[best_j + best_k]
    {
        best_k += 1;
    }

    (best_i, best_j, best_k)
}

fn popular_chars(b: &[char]) -> HashSet<char> {
    if b.len() < AUTOJUNK_MIN_LEN {
        return HashSet::new();
    }
    let limit = b.len() / 100 + 1;
    let mut counts: HashMap<char, usize> = HashMap::new();
    for &c in b {
        *counts.entry(c).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, n)| n > limit)
        .map(|(c, _)| c)
        .collect()
}
