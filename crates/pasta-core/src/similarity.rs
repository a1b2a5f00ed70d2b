//! Edit-distance similarity between strings and between snippets.
//!
//! Both functions are O(len(a) * len(b)) in time. For long code bodies this
//! is the dominant cost of duplicate detection, which runs it once per
//! stored snippet.

use crate::models::Snippet;

pub const TITLE_WEIGHT: f64 = 0.4;
pub const CODE_WEIGHT: f64 = 0.6;

/// Levenshtein distance with unit cost for insert, delete and substitute,
/// counted in `char`s.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the DP matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Normalized similarity in `[0.0, 1.0]`: `1 - distance / max_len`.
///
/// An empty side scores 0.0. Strings equal ignoring case score 1.0 without
/// running the distance.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.to_lowercase() == b.to_lowercase() {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = levenshtein(a, b);
    (1.0 - distance as f64 / max_len as f64).max(0.0)
}

/// Weighted title/code similarity of two snippets on lower-cased text.
///
/// A component only counts when both sides have non-blank text for it. The
/// weights are not renormalized, so a pair that can only be compared on one
/// component tops out at that component's weight.
pub fn snippet_similarity(a: &Snippet, b: &Snippet) -> f64 {
    weighted_component(&a.title, &b.title, TITLE_WEIGHT)
        + weighted_component(&a.code, &b.code, CODE_WEIGHT)
}

fn weighted_component(a: &str, b: &str, weight: f64) -> f64 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }
    similarity(&a.to_lowercase(), &b.to_lowercase()) * weight
}
