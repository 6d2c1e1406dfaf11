//! taskpilot - personal task tracker with AI extraction and ranking
//!
//! Ingests text, audio, or video, extracts candidate tasks via a locally
//! hosted language model, and ranks them by inferred importance.
//!
//! # Architecture
//!
//! Business logic lives in a headless core (`engine::Tracker`) consumed by
//! the CLI front end:
//! - Tasks are stored as a flat JSON file, read permissively
//! - The model is reached through a subprocess adapter (`ollama run`)
//! - Each mutation triggers a best-effort ranking pass before persisting
//!
//! # Modules
//!
//! - `adapters`: Language-model backends (Ollama subprocess)
//! - `engine`: Extraction parsing, ranking, and the `Tracker` service
//! - `media`: ffmpeg decode + whisper transcription
//! - `store`: Flat-file task store
//! - `domain`: Data structures (Task, TaskSource)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a task directly
//! taskpilot add "buy milk"
//!
//! # Extract tasks from a brain dump
//! taskpilot extract "need to call mom and finish the report by friday"
//!
//! # Extract tasks from a voice memo or video
//! taskpilot ingest meeting.mp4
//!
//! # Complete the top task
//! taskpilot done 1
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod media;
pub mod store;

// Re-export main types at crate root for convenience
pub use adapters::{LanguageModel, OllamaAdapter};
pub use domain::{Task, TaskSource};
pub use engine::{IngestOutcome, Tracker};
pub use store::TaskStore;
