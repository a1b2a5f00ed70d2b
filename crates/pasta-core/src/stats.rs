use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Snippet;

/// Summary numbers for a snippet collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetStats {
    pub total: usize,
    pub favorites: usize,
    /// Keyed by lower-cased language label; blank labels are not counted.
    pub languages: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SnippetStats {
    pub fn from_snippets(snippets: &[Snippet]) -> Self {
        let mut stats = SnippetStats {
            total: snippets.len(),
            ..Default::default()
        };

        for snippet in snippets {
            if snippet.is_favorite {
                stats.favorites += 1;
            }

            let language = snippet.language.trim().to_lowercase();
            if !language.is_empty() {
                *stats.languages.entry(language).or_default() += 1;
            }

            for tag in snippet.tags.iter().filter(|t| !t.is_empty()) {
                *stats.tags.entry(tag.clone()).or_default() += 1;
            }

            stats.last_updated = stats.last_updated.max(Some(snippet.updated_at));
        }

        stats
    }

    /// Most used tags, highest count first, ties by name.
    pub fn top_tags(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut tags: Vec<(&str, usize)> = self
            .tags
            .iter()
            .map(|(tag, count)| (tag.as_str(), *count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tags.truncate(limit);
        tags
    }
}
