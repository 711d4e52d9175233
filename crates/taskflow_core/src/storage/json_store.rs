//! Persistence adapter: the task collection as a JSON document on disk.
//!
//! The wire format is a pretty-printed JSON array of task objects, field
//! names as in [`crate::model::Task`]. There is no envelope and no schema
//! version; `load_tasks(save_tasks(tasks)) == tasks`, order preserved.
//! Saves are direct overwrites; the single-user desktop scale does not ask
//! for anything transactional.

use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "tasks.json";
const STORE_ENV_VAR: &str = "TASKFLOW_STORE_PATH";
const BACKUP_SUFFIX: &str = "bak";

/// Resolves the on-disk location of the task file.
///
/// `TASKFLOW_STORE_PATH` wins, then the configured `data_file`, then the
/// fixed `tasks.json` relative to the working directory.
pub fn store_path(data_file: Option<&str>) -> PathBuf {
    if let Ok(path) = std::env::var(STORE_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    match data_file {
        Some(file) if !file.trim().is_empty() => PathBuf::from(file),
        _ => PathBuf::from(STORE_FILE_NAME),
    }
}

/// Loads the full task collection. A missing file is the first-run case and
/// yields an empty collection; an unreadable or malformed file is an error.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, AppError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    let tasks: Vec<Task> =
        serde_json::from_str(&content).map_err(|err| AppError::invalid_data(err.to_string()))?;

    Ok(tasks)
}

/// Overwrites the task file with the full collection.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = serde_json::to_string_pretty(tasks)
        .map_err(|err| AppError::invalid_data(err.to_string()))?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    Ok(())
}

/// Copies an unreadable store file to `<path>.bak` so its content survives
/// the fallback to an empty collection. Best effort; returns the backup
/// location when the copy succeeded.
pub fn backup_corrupt(path: &Path) -> Option<PathBuf> {
    if !path.exists() {
        return None;
    }

    let backup = path.with_extension(BACKUP_SUFFIX);
    match std::fs::copy(path, &backup) {
        Ok(_) => Some(backup),
        Err(err) => {
            log::warn!("could not back up {}: {}", path.display(), err);
            None
        }
    }
}
