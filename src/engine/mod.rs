//! Headless task-tracking core.
//!
//! `Tracker` is the plain callable interface behind any front end: it owns
//! the store and the model adapter and exposes the four user actions plus
//! list/rank. Every mutation follows the same flow: mutate the in-memory
//! list, run a ranking pass, persist, and hand the result back for display.

pub mod extract;
pub mod parse;
pub mod rank;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Result};

use crate::adapters::LanguageModel;
use crate::domain::{Task, TaskSource};
use crate::media;
use crate::store::TaskStore;

pub use extract::extract_tasks;
pub use rank::{apply_ranking, rank_tasks};

/// Outcome of a media ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Transcription produced no text
    NoTranscript,

    /// Transcript produced, but the model extracted no tasks
    NoTasks,

    /// This many tasks were added and ranked
    Added(usize),
}

/// Task tracker service: store + model, consumed by any front end
pub struct Tracker {
    store: TaskStore,
    model: Arc<dyn LanguageModel>,
}

impl Tracker {
    /// Create a tracker over an explicit store and model
    pub fn new(store: TaskStore, model: Arc<dyn LanguageModel>) -> Self {
        Self { store, model }
    }

    /// The current stored task sequence, in ranked order
    pub async fn tasks(&self) -> Vec<Task> {
        self.store.load().await
    }

    /// Add a single manually entered task, rank, and persist
    pub async fn add_manual(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            bail!("Task text is empty");
        }

        self.add_and_rank(vec![text.to_string()], TaskSource::Manual)
            .await
    }

    /// Extract tasks from typed text, then add, rank, and persist.
    ///
    /// Returns the number of tasks added; 0 means the model extracted
    /// nothing, which is a non-fatal condition.
    pub async fn extract_from_text(&self, text: &str) -> Result<usize> {
        let extracted = extract_tasks(self.model.as_ref(), text).await?;
        if extracted.is_empty() {
            return Ok(0);
        }

        let count = extracted.len();
        self.add_and_rank(extracted, TaskSource::Ai).await?;
        Ok(count)
    }

    /// Transcribe a media file, extract tasks from the transcript, then
    /// add, rank, and persist.
    ///
    /// Decode and model-load failures are errors; an empty transcript or
    /// empty extraction is a non-fatal outcome.
    pub async fn ingest_media(&self, path: &Path) -> Result<IngestOutcome> {
        let transcript = media::transcribe_media(path).await?;
        if transcript.is_empty() {
            return Ok(IngestOutcome::NoTranscript);
        }

        let extracted = extract_tasks(self.model.as_ref(), &transcript).await?;
        if extracted.is_empty() {
            return Ok(IngestOutcome::NoTasks);
        }

        let count = extracted.len();
        self.add_and_rank(extracted, TaskSource::Media).await?;
        Ok(IngestOutcome::Added(count))
    }

    /// Remove the task at the given stored position and persist.
    ///
    /// Rows are addressed by position in the ranked list, exactly as
    /// displayed. No ranking pass runs on removal.
    pub async fn remove(&self, row: usize) -> Result<Task> {
        let mut tasks = self.store.load().await;
        if row >= tasks.len() {
            bail!("No task at row {} (list has {} tasks)", row, tasks.len());
        }

        let removed = tasks.remove(row);
        self.store.save(&tasks).await?;
        Ok(removed)
    }

    /// Run one ranking pass over the stored list and persist
    pub async fn rank_now(&self) -> Result<()> {
        let mut tasks = self.store.load().await;
        rank_tasks(self.model.as_ref(), &mut tasks).await?;
        self.store.save(&tasks).await
    }

    /// Append new tasks, run a ranking pass, and persist
    async fn add_and_rank(&self, texts: Vec<String>, source: TaskSource) -> Result<()> {
        let mut tasks = self.store.load().await;
        for text in texts {
            tasks.push(Task::new(text, source));
        }

        rank_tasks(self.model.as_ref(), &mut tasks).await?;
        self.store.save(&tasks).await
    }
}
