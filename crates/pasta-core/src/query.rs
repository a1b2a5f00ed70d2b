//! Filtering of the snippet list: free text, selected tags, favorites.
//!
//! The engine's tag filter keeps a snippet when it carries *any* selected tag.
//! [`SnippetStore::by_tags`](crate::storage::SnippetStore::by_tags) is the
//! stricter all-tags variant and is kept as a separate operation.

use std::collections::BTreeSet;

use crate::models::Snippet;

/// Case-insensitive substring match on title, code or any tag.
/// A blank term matches everything; any other term is matched as typed,
/// surrounding whitespace included.
pub fn matches_text(snippet: &Snippet, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    snippet.title.to_lowercase().contains(&needle)
        || snippet.code.to_lowercase().contains(&needle)
        || snippet
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

/// True when the snippet carries at least one of `tags`.
pub fn has_any_tag<'a, I>(snippet: &Snippet, tags: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter().any(|tag| snippet.has_tag(tag))
}

/// True when the snippet carries every one of `tags`.
pub fn has_all_tags<'a, I>(snippet: &Snippet, tags: I) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    tags.into_iter().all(|tag| snippet.has_tag(tag))
}

/// Current filter selection of a snippet list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetQuery {
    pub search_text: String,
    pub selected_tags: BTreeSet<String>,
    pub favorites_only: bool,
}

impl SnippetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn favorites_only(mut self, on: bool) -> Self {
        self.favorites_only = on;
        self
    }

    /// Select the tag if unselected, deselect it otherwise.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.selected_tags.remove(tag) {
            false
        } else {
            self.selected_tags.insert(tag.to_string());
            true
        }
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.selected_tags.contains(tag)
    }

    /// Reset search text and tag selection. The favorites flag is a view
    /// toggle and survives.
    pub fn clear(&mut self) {
        self.search_text.clear();
        self.selected_tags.clear();
    }

    /// No criterion would drop anything.
    pub fn is_empty(&self) -> bool {
        self.search_text.trim().is_empty() && self.selected_tags.is_empty() && !self.favorites_only
    }

    pub fn apply(&self, snippets: &[Snippet]) -> Vec<Snippet> {
        apply(
            snippets,
            &self.search_text,
            &self.selected_tags,
            self.favorites_only,
        )
    }
}

/// Visible snippets for the given criteria, in input order.
///
/// Stages run as text, then tags (any-of), then favorites. Each stage is a
/// no-op when its criterion is blank, empty or off.
pub fn apply(
    snippets: &[Snippet],
    search_text: &str,
    selected_tags: &BTreeSet<String>,
    favorites_only: bool,
) -> Vec<Snippet> {
    let mut visible: Vec<&Snippet> = snippets
        .iter()
        .filter(|s| matches_text(s, search_text))
        .collect();
    tracing::trace!(count = visible.len(), "after text filter");

    if !selected_tags.is_empty() {
        visible.retain(|s| has_any_tag(s, selected_tags));
        tracing::trace!(count = visible.len(), "after tag filter");
    }

    if favorites_only {
        visible.retain(|s| s.is_favorite);
        tracing::trace!(count = visible.len(), "after favorites filter");
    }

    visible.into_iter().cloned().collect()
}
