//! Pasta core: the snippet store, the list query engine and near-duplicate
//! detection behind the Pasta snippet manager.

pub mod config;
pub mod duplicates;
pub mod error;
pub mod models;
pub mod query;
pub mod samples;
pub mod similarity;
pub mod stats;
pub mod storage;

// Re-export common items for convenience
pub use config::{get_config_dir, get_db_file_path, DB_FILENAME};
pub use duplicates::{find_duplicates, DuplicateMatch, DUPLICATE_THRESHOLD};
pub use error::{PastaError, Result};
pub use models::{parse_tags, Snippet};
pub use query::SnippetQuery;
pub use similarity::{similarity, snippet_similarity};
pub use stats::SnippetStats;
pub use storage::{ImportMode, SnippetStore};
