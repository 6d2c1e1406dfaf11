//! The task record and its source tag.
//!
//! Tasks are append-only: text, source and timestamp never change after
//! creation. The only mutable field is `priority_score`, owned by the
//! ranking engine. Completion removes the record entirely, so a persisted
//! task always has `completed == false`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single task in the tracked list.
///
/// The stored order of tasks is significant: it reflects the last computed
/// ranking (descending by `priority_score`) and rows are addressed by
/// position, not by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable once created
    pub id: Uuid,

    /// Free-form task text, immutable after creation
    pub text: String,

    /// Whether the task is done. Completion removes the record, so this
    /// is never persisted as true.
    pub completed: bool,

    /// Creation time
    pub timestamp: DateTime<Utc>,

    /// Rank-derived score, recomputed wholesale on each ranking pass
    pub priority_score: i64,

    /// Where the task came from
    pub source: TaskSource,
}

impl Task {
    /// Create a new incomplete task with the current timestamp and score 0
    pub fn new(text: impl Into<String>, source: TaskSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            timestamp: Utc::now(),
            priority_score: 0,
            source,
        }
    }
}

/// Origin of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    /// Typed in directly by the user
    Manual,

    /// Extracted from typed text by the language model
    Ai,

    /// Extracted from a transcribed audio/video file
    Media,
}

impl std::fmt::Display for TaskSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskSource::Manual => write!(f, "manual"),
            TaskSource::Ai => write!(f, "ai"),
            TaskSource::Media => write!(f, "media"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let task = Task::new("buy milk", TaskSource::Manual);

        assert_eq!(task.text, "buy milk");
        assert!(!task.completed);
        assert_eq!(task.priority_score, 0);
        assert_eq!(task.source, TaskSource::Manual);
    }

    #[test]
    fn test_unique_ids() {
        let a = Task::new("a", TaskSource::Manual);
        let b = Task::new("b", TaskSource::Manual);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_source_serialization() {
        for (source, tag) in [
            (TaskSource::Manual, "\"manual\""),
            (TaskSource::Ai, "\"ai\""),
            (TaskSource::Media, "\"media\""),
        ] {
            let json = serde_json::to_string(&source).unwrap();
            assert_eq!(json, tag);
            let parsed: TaskSource = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, source);
        }
    }

    #[test]
    fn test_task_round_trip() {
        let task = Task::new("call mom", TaskSource::Ai);
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, task.id);
        assert_eq!(parsed.text, task.text);
        assert_eq!(parsed.timestamp, task.timestamp);
        assert_eq!(parsed.priority_score, task.priority_score);
        assert_eq!(parsed.source, task.source);
    }
}
