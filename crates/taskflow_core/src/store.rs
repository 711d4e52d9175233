//! The task store: owns the ordered task collection, assigns ids, applies
//! mutations, and keeps the on-disk document in sync.
//!
//! The store is an instance owned by the application root and handed to the
//! presentation layer; nothing here is global. Every mutation rewrites the
//! full file before returning. A failed save is returned to the caller but
//! the in-memory mutation stands; memory is the source of truth until the
//! next successful save.

use crate::error::AppError;
use crate::model::{Filter, Statistics, Task};
use crate::storage::json_store;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
}

/// Result of [`TaskStore::open_with_fallback`]: always a usable store, plus
/// the load error when the persisted file had to be abandoned.
pub struct StoreOpen {
    pub store: TaskStore,
    pub error: Option<AppError>,
}

impl TaskStore {
    /// Opens the store at `path`. A missing file is the first run and yields
    /// an empty collection; a corrupt file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let tasks = json_store::load_tasks(&path)?;
        Ok(Self::from_tasks(path, tasks))
    }

    /// Startup entry point: falls back to an empty collection when the file
    /// cannot be loaded, after copying the raw content to a backup. The
    /// error is surfaced to the caller rather than swallowed.
    pub fn open_with_fallback(path: impl Into<PathBuf>) -> StoreOpen {
        let path = path.into();
        match json_store::load_tasks(&path) {
            Ok(tasks) => StoreOpen {
                store: Self::from_tasks(path, tasks),
                error: None,
            },
            Err(err) => {
                log::warn!(
                    "task store {} is unreadable, starting empty: {}",
                    path.display(),
                    err
                );
                if let Some(backup) = json_store::backup_corrupt(&path) {
                    log::info!("unreadable store content kept at {}", backup.display());
                }
                StoreOpen {
                    store: Self::from_tasks(path, Vec::new()),
                    error: Some(err),
                }
            }
        }
    }

    fn from_tasks(path: PathBuf, tasks: Vec<Task>) -> Self {
        // Seed above every persisted id. The counter only ever grows within
        // a session, so ids stay unique even across deletions.
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;
        Self {
            path,
            tasks,
            next_id,
        }
    }

    /// Creates a task with the next id, pending, stamped with the current
    /// time, and appends it to the end of the collection.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Task, AppError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        let task = Task {
            id: self.next_id,
            title: trimmed.to_string(),
            description: description.trim().to_string(),
            completed: false,
            created_at: now_rfc3339()?,
            completed_at: None,
        };

        self.next_id += 1;
        self.tasks.push(task.clone());
        self.persist()?;

        Ok(task)
    }

    /// Marks a task completed or pending. `completed_at` is set exactly when
    /// the task is completed and cleared on the way back. An unknown id is a
    /// silent no-op; the original behaved that way and still saved, so the
    /// save happens here unconditionally too.
    pub fn set_completion(&mut self, id: u64, completed: bool) -> Result<(), AppError> {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.completed = completed;
            task.completed_at = if completed { Some(now_rfc3339()?) } else { None };
        }

        self.persist()
    }

    /// Overwrites a task's title and description in place. A blank trimmed
    /// title fails validation before any mutation, and nothing is persisted
    /// in that case. An unknown id is a no-op.
    pub fn edit(&mut self, id: u64, new_title: &str, new_description: &str) -> Result<(), AppError> {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("title is required"));
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.title = trimmed.to_string();
            task.description = new_description.trim().to_string();
        }

        self.persist()
    }

    /// Removes the task with the given id; no-op when absent.
    pub fn delete(&mut self, id: u64) -> Result<(), AppError> {
        self.tasks.retain(|task| task.id != id);
        self.persist()
    }

    /// The collection as seen through a filter, insertion order preserved.
    /// Pure read.
    pub fn filtered(&self, filter: Filter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| match filter {
                Filter::All => true,
                Filter::Pending => !task.completed,
                Filter::Completed => task.completed,
            })
            .cloned()
            .collect()
    }

    /// Aggregate counts over the full collection. Pure read.
    pub fn statistics(&self) -> Statistics {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|task| task.completed).count();
        let pending = total - completed;
        let percent_complete = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };

        Statistics {
            total,
            pending,
            completed,
            percent_complete,
        }
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}

fn now_rfc3339() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}
