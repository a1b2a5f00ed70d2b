use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{PastaError, Result};

/// A titled, tagged block of code.
///
/// Field names follow the persisted document (`isFavorite`, `createdAt`, ...);
/// the PascalCase names of older CopyPasta exports are accepted on input.
/// Decoding is lenient: absent or `null` fields fall back to empty values so a
/// hand-edited document still loads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    #[serde(default, alias = "Id")]
    pub id: String,
    #[serde(default, alias = "Title")]
    pub title: String,
    /// Display/highlighting label only, never validated.
    #[serde(default, alias = "Language")]
    pub language: String,
    #[serde(default, deserialize_with = "deserialize_tags", alias = "Tags")]
    pub tags: Vec<String>,
    #[serde(default, alias = "Code")]
    pub code: String,
    #[serde(default, alias = "IsFavorite")]
    pub is_favorite: bool,
    #[serde(default = "Utc::now", alias = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now", alias = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn new(
        title: impl Into<String>,
        language: impl Into<String>,
        tags: Vec<String>,
        code: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            title: title.into(),
            language: language.into(),
            tags: normalize_tags(tags),
            code: code.into(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Has a non-blank title or non-blank code.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.code.trim().is_empty()
    }

    /// Dialog-level checks: a snippet needs a title and some code.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PastaError::Validation("title must not be blank".to_string()));
        }
        if self.code.trim().is_empty() {
            return Err(PastaError::Validation("code must not be blank".to_string()));
        }
        Ok(())
    }

    /// Bring a decoded record back within the model's invariants: an id,
    /// clean tags and `created_at <= updated_at`.
    pub(crate) fn repair(&mut self) {
        if self.id.trim().is_empty() {
            self.id = new_id();
        }
        self.tags = normalize_tags(std::mem::take(&mut self.tags));
        if self.updated_at < self.created_at {
            self.updated_at = self.created_at;
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trim tags, drop blanks and exact repeats. First occurrence wins, order is kept.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Parse the comma separated tag field of the snippet form.
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(normalize_tags(raw.unwrap_or_default().into_iter().flatten()))
}
