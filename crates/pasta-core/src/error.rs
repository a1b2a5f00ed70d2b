use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PastaError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing the backing document failed.
    #[error("failed to access snippet store at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document exists but is not a valid snippet array.
    #[error("malformed snippet document at {path}: {source}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize snippets: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid snippet: {0}")]
    Validation(String),

    #[error("no snippets found to import from {path}")]
    EmptyImport { path: PathBuf },

    #[error("no per-user configuration directory available")]
    ConfigDirNotFound,
}

pub type Result<T> = std::result::Result<T, PastaError>;
