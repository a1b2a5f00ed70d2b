use crate::error::{PastaError, Result};
use std::env;
use std::path::PathBuf;

pub const APP_DIR_NAME: &str = "pasta";
pub const DB_FILENAME: &str = "snippets.json";
/// Overrides the data directory, mostly for tests and portable installs.
pub const CONFIG_DIR_ENV: &str = "PASTA_CONFIG_DIR";

/// Get the pasta configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    resolve_config_dir(env::var(CONFIG_DIR_ENV).ok(), dirs::config_dir())
}

fn resolve_config_dir(
    override_dir: Option<String>,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    match override_dir {
        Some(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir)),
        _ => platform_dir
            .map(|base| base.join(APP_DIR_NAME))
            .ok_or(PastaError::ConfigDirNotFound),
    }
}

/// Get the path to the snippet document
pub fn get_db_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(DB_FILENAME))
}
