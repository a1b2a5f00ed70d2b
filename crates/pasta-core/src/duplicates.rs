//! Near-duplicate detection for snippets about to be saved.

use crate::models::Snippet;
use crate::similarity::snippet_similarity;

/// Minimum weighted score for a stored snippet to be reported.
pub const DUPLICATE_THRESHOLD: f64 = 0.70;

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateMatch {
    pub snippet: Snippet,
    pub score: f64,
}

/// Find stored snippets that look like `candidate`, best match first.
///
/// A snippet sharing the candidate's id is skipped so an edit never flags
/// itself. Cost is one [`snippet_similarity`] per stored snippet, fine for a
/// personal collection of a few hundred entries.
pub fn find_duplicates(candidate: &Snippet, existing: &[Snippet]) -> Vec<DuplicateMatch> {
    let mut matches: Vec<DuplicateMatch> = existing
        .iter()
        .filter(|s| s.id != candidate.id)
        .filter_map(|s| {
            let score = snippet_similarity(s, candidate);
            (score >= DUPLICATE_THRESHOLD).then(|| DuplicateMatch {
                snippet: s.clone(),
                score,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    matches
}
