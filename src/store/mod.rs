//! Flat-file task store.
//!
//! A single JSON file holding the full task list. Reads are permissive: a
//! missing, unreadable, or malformed file loads as an empty list, so a
//! fresh install and a corrupt file look the same to callers. Writes go
//! through a temp file and rename in the same directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::config;
use crate::domain::Task;

/// Task store bound to a single JSON file
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Create a store over an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store over the configured default path (`<home>/tasks.json`)
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(config::tasks_path()?))
    }

    /// The file this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored task list.
    ///
    /// Never errors: absence, read failure, and parse failure all yield an
    /// empty list. The cause is only visible at debug log level.
    pub async fn load(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "task file not readable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "task file not parseable, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored task list.
    ///
    /// Serializes with two-space indentation and replaces the file via a
    /// sibling temp file and rename.
    pub async fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }

        let content = serde_json::to_string_pretty(tasks)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskSource;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::new(temp.path().join("tasks.json"));

        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "{not valid json").await.unwrap();

        let store = TaskStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "").await.unwrap();

        let store = TaskStore::new(&path);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::new(temp.path().join("tasks.json"));

        let tasks = vec![
            Task::new("buy milk", TaskSource::Manual),
            Task::new("call mom", TaskSource::Ai),
        ];
        store.save(&tasks).await.unwrap();

        let loaded = store.load().await;
        assert_eq!(loaded.len(), 2);
        for (saved, loaded) in tasks.iter().zip(&loaded) {
            assert_eq!(saved.id, loaded.id);
            assert_eq!(saved.text, loaded.text);
            assert_eq!(saved.timestamp, loaded.timestamp);
            assert_eq!(saved.priority_score, loaded.priority_score);
            assert_eq!(saved.source, loaded.source);
        }
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let store = TaskStore::new(temp.path().join("nested/dir/tasks.json"));

        store.save(&[Task::new("a", TaskSource::Manual)]).await.unwrap();
        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_two_space_indentation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        let store = TaskStore::new(&path);

        store.save(&[Task::new("a", TaskSource::Manual)]).await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("\n  {"));
    }
}
