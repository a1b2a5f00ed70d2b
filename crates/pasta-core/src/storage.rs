//! The snippet store: owns the collection and the JSON document behind it.
//!
//! The whole collection is rewritten on every mutation. Mutations hold the
//! collection lock across modify-and-persist, so two callers sharing one
//! store never lose each other's writes. Two stores on the same file still
//! race; the last writer wins.

use std::collections::{BTreeSet, HashSet};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::get_db_file_path;
use crate::duplicates::{find_duplicates, DuplicateMatch};
use crate::error::{PastaError, Result};
use crate::models::{new_id, normalize_tags, Snippet};
use crate::query::{has_all_tags, matches_text, SnippetQuery};
use crate::samples::sample_snippets;
use crate::stats::SnippetStats;

/// How imported records combine with the current collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Drop everything stored, keep only the imported records.
    Replace,
    /// Append the imported records to the stored ones.
    Merge,
}

#[derive(Debug)]
pub struct SnippetStore {
    path: PathBuf,
    snippets: Mutex<Vec<Snippet>>,
}

impl SnippetStore {
    /// Load the store at `path`, seeding it on first run.
    ///
    /// Never fails: a missing document is replaced by the sample collection
    /// (and written out), an unreadable or malformed one is answered with the
    /// samples in memory only. An empty document is an empty collection.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let snippets = load_or_seed(&path).await;
        Self {
            path,
            snippets: Mutex::new(snippets),
        }
    }

    /// Open the store at the per-user default location.
    pub async fn open_default() -> Result<Self> {
        let path = get_db_file_path()?;
        Ok(Self::open(path).await)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_all(&self) -> Vec<Snippet> {
        self.snippets.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.snippets.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snippets.lock().await.is_empty()
    }

    pub async fn get_by_id(&self, id: &str) -> Option<Snippet> {
        self.snippets
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Append a snippet and persist.
    ///
    /// The snippet keeps its id and `created_at`; `updated_at` is set to now.
    /// A blank or already used id is rejected before anything changes. If the
    /// write fails the snippet stays in memory and the error is returned.
    pub async fn add(&self, mut snippet: Snippet) -> Result<()> {
        let mut snippets = self.snippets.lock().await;

        if snippet.id.trim().is_empty() {
            return Err(PastaError::Validation("snippet id must not be blank".to_string()));
        }
        if snippets.iter().any(|s| s.id == snippet.id) {
            return Err(PastaError::Validation(format!(
                "a snippet with id '{}' already exists",
                snippet.id
            )));
        }

        snippet.tags = normalize_tags(std::mem::take(&mut snippet.tags));
        snippet.touch();
        debug!(id = %snippet.id, title = %snippet.title, "adding snippet");
        snippets.push(snippet);

        write_document(&self.path, &snippets).await
    }

    /// Overwrite the mutable fields of the stored snippet with the same id.
    ///
    /// Returns `Ok(false)` without writing anything when no snippet has that
    /// id. `id` and `created_at` of the stored record are kept.
    pub async fn update(&self, snippet: &Snippet) -> Result<bool> {
        let mut snippets = self.snippets.lock().await;

        let Some(existing) = snippets.iter_mut().find(|s| s.id == snippet.id) else {
            debug!(id = %snippet.id, "update ignored, no such snippet");
            return Ok(false);
        };

        existing.title = snippet.title.clone();
        existing.language = snippet.language.clone();
        existing.tags = normalize_tags(&snippet.tags);
        existing.code = snippet.code.clone();
        existing.is_favorite = snippet.is_favorite;
        existing.touch();
        debug!(id = %snippet.id, "updated snippet");

        write_document(&self.path, &snippets).await?;
        Ok(true)
    }

    /// Set the favorite flag of one snippet. `Ok(false)` for an unknown id.
    pub async fn set_favorite(&self, id: &str, is_favorite: bool) -> Result<bool> {
        let mut snippets = self.snippets.lock().await;

        let Some(existing) = snippets.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        existing.is_favorite = is_favorite;
        existing.touch();
        debug!(id, is_favorite, "set favorite");

        write_document(&self.path, &snippets).await?;
        Ok(true)
    }

    /// Remove the snippet with `id`. `Ok(false)` and no write when absent.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut snippets = self.snippets.lock().await;

        let before = snippets.len();
        snippets.retain(|s| s.id != id);
        if snippets.len() == before {
            debug!(id, "delete ignored, no such snippet");
            return Ok(false);
        }
        debug!(id, "deleted snippet");

        write_document(&self.path, &snippets).await?;
        Ok(true)
    }

    /// Every distinct non-empty tag, sorted ascending.
    pub async fn all_tags(&self) -> Vec<String> {
        let snippets = self.snippets.lock().await;
        snippets
            .iter()
            .flat_map(|s| s.tags.iter())
            .filter(|t| !t.is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Case-insensitive match on title, code or tags. Blank terms match all.
    pub async fn search(&self, term: &str) -> Vec<Snippet> {
        let snippets = self.snippets.lock().await;
        snippets
            .iter()
            .filter(|s| matches_text(s, term))
            .cloned()
            .collect()
    }

    /// Snippets carrying *all* of `tags`. An empty list matches everything.
    ///
    /// The list view filter in [`SnippetQuery`] keeps snippets with *any*
    /// selected tag instead.
    pub async fn by_tags(&self, tags: &[String]) -> Vec<Snippet> {
        let snippets = self.snippets.lock().await;
        snippets
            .iter()
            .filter(|s| has_all_tags(s, tags))
            .cloned()
            .collect()
    }

    pub async fn query(&self, query: &SnippetQuery) -> Vec<Snippet> {
        let snippets = self.snippets.lock().await;
        query.apply(&snippets)
    }

    /// Stored snippets that look like `candidate`. Read-only; callers decide
    /// whether to warn or refuse the save.
    pub async fn find_duplicates(&self, candidate: &Snippet) -> Vec<DuplicateMatch> {
        let snapshot = self.get_all().await;
        find_duplicates(candidate, &snapshot)
    }

    pub async fn stats(&self) -> SnippetStats {
        let snippets = self.snippets.lock().await;
        SnippetStats::from_snippets(&snippets)
    }

    /// The collection as a standalone JSON document.
    pub async fn export_json(&self) -> Result<String> {
        let snippets = self.snippets.lock().await;
        Ok(serde_json::to_string_pretty(&*snippets)?)
    }

    /// Write the collection to `path`. Returns the number of records written.
    pub async fn export_to(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let snippets = self.snippets.lock().await;
        write_document(path, &snippets).await?;
        info!(path = %path.display(), count = snippets.len(), "exported snippets");
        Ok(snippets.len())
    }

    /// Import the records of the document at `path` under fresh ids.
    ///
    /// An unreadable file, a malformed document, one with zero records or one
    /// with a record lacking both title and code is an error and leaves the
    /// collection as it was. Returns the number of imported records.
    pub async fn import_from(&self, path: impl AsRef<Path>, mode: ImportMode) -> Result<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| PastaError::Persistence {
                path: path.to_path_buf(),
                source,
            })?;

        let records = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<Vec<Snippet>>(&content).map_err(|source| {
                PastaError::Deserialization {
                    path: path.to_path_buf(),
                    source,
                }
            })?
        };
        if records.is_empty() {
            return Err(PastaError::EmptyImport {
                path: path.to_path_buf(),
            });
        }
        if let Some(index) = records.iter().position(|r| !r.has_content()) {
            return Err(PastaError::Validation(format!(
                "record {index} in {} has neither a title nor code",
                path.display()
            )));
        }

        let now = Utc::now();
        let imported: Vec<Snippet> = records
            .into_iter()
            .map(|mut record| {
                record.id = new_id();
                record.created_at = record.created_at.min(now);
                record.repair();
                record.touch();
                record
            })
            .collect();
        let count = imported.len();

        let mut snippets = self.snippets.lock().await;
        match mode {
            ImportMode::Replace => *snippets = imported,
            ImportMode::Merge => snippets.extend(imported),
        }
        info!(path = %path.display(), count, ?mode, "imported snippets");

        write_document(&self.path, &snippets).await?;
        Ok(count)
    }

    /// Throw the collection away and start over from the samples.
    ///
    /// The collection is only replaced once the old file is gone.
    pub async fn reset_to_samples(&self) -> Result<()> {
        let mut snippets = self.snippets.lock().await;

        match fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(PastaError::Persistence {
                    path: self.path.clone(),
                    source,
                })
            }
        }

        *snippets = sample_snippets();
        info!(path = %self.path.display(), count = snippets.len(), "reset to sample snippets");
        write_document(&self.path, &snippets).await
    }
}

async fn load_or_seed(path: &Path) -> Vec<Snippet> {
    match fs::read_to_string(path).await {
        Ok(content) => match decode_document(&content) {
            Ok(snippets) => {
                info!(path = %path.display(), count = snippets.len(), "loaded snippets");
                snippets
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed snippet document, using samples");
                sample_snippets()
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let samples = sample_snippets();
            info!(path = %path.display(), count = samples.len(), "no snippet document, seeding samples");
            if let Err(e) = write_document(path, &samples).await {
                warn!(error = %e, "failed to persist sample snippets");
            }
            samples
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read snippet document, using samples");
            sample_snippets()
        }
    }
}

/// Parse a stored document, repairing ids and timestamps. Blank content is an
/// empty collection.
fn decode_document(content: &str) -> serde_json::Result<Vec<Snippet>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut snippets: Vec<Snippet> = serde_json::from_str(content)?;
    let mut seen = HashSet::new();
    for snippet in &mut snippets {
        snippet.repair();
        if !seen.insert(snippet.id.clone()) {
            snippet.id = new_id();
            seen.insert(snippet.id.clone());
        }
    }
    Ok(snippets)
}

/// Serialize `snippets` and atomically replace the file at `path`.
async fn write_document(path: &Path, snippets: &[Snippet]) -> Result<()> {
    let serialized = serde_json::to_string_pretty(snippets)?;
    let target = path.to_path_buf();

    tokio::task::spawn_blocking(move || write_atomic(&target, serialized.as_bytes()))
        .await
        .map_err(|e| PastaError::Io(io::Error::other(e)))?
        .map_err(|source| PastaError::Persistence {
            path: path.to_path_buf(),
            source,
        })
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
