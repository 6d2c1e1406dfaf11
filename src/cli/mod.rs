//! Command-line interface for taskpilot.
//!
//! A thin presentation layer over the headless `Tracker`: add a manual
//! task, extract tasks from typed text, ingest an audio/video file, remove
//! a task by row, and print the ranked list.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::OllamaAdapter;
use crate::config;
use crate::engine::{IngestOutcome, Tracker};
use crate::store::TaskStore;

/// taskpilot - personal task tracker with AI extraction and ranking
#[derive(Parser, Debug)]
#[command(name = "taskpilot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a manual task
    Add {
        /// Task text
        text: String,
    },

    /// Extract tasks from free text via the model
    Extract {
        /// Text to extract from (reads from stdin if not provided)
        text: Option<String>,
    },

    /// Transcribe an audio/video file and extract tasks from it
    Ingest {
        /// Path to the media file (.mp3, .mp4, .wav, ...)
        path: PathBuf,
    },

    /// Remove the task at the given list position
    Done {
        /// 1-based row number as shown by `list`
        row: usize,
    },

    /// Show the current ranked task list
    List,

    /// Re-run the ranking pass over all tasks
    Rank,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Add { text } => add_task(&text).await,
            Commands::Extract { text } => extract_tasks(text).await,
            Commands::Ingest { path } => ingest_media(path).await,
            Commands::Done { row } => complete_task(row).await,
            Commands::List => list_tasks().await,
            Commands::Rank => rank_tasks().await,
            Commands::Config => show_config(),
        }
    }
}

/// Build the tracker from resolved configuration
fn tracker() -> Result<Tracker> {
    let cfg = config::config()?;
    let model = OllamaAdapter::with_binary_path(cfg.model.clone(), cfg.ollama_binary.clone());
    Ok(Tracker::new(TaskStore::from_config()?, Arc::new(model)))
}

/// Add a manual task, rank, and print the refreshed list
async fn add_task(text: &str) -> Result<()> {
    let tracker = tracker()?;
    tracker.add_manual(text).await?;
    print_tasks(&tracker).await
}

/// Extract tasks from typed text (or stdin) and add them
async fn extract_tasks(text: Option<String>) -> Result<()> {
    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    if text.trim().is_empty() {
        anyhow::bail!("No input provided. Pass text as an argument or pipe to stdin");
    }

    let tracker = tracker()?;
    let added = tracker.extract_from_text(&text).await?;

    if added == 0 {
        eprintln!("No tasks extracted.");
        return Ok(());
    }

    eprintln!("Added {} task(s).", added);
    print_tasks(&tracker).await
}

/// Transcribe a media file and extract tasks from the transcript
async fn ingest_media(path: PathBuf) -> Result<()> {
    let tracker = tracker()?;

    match tracker.ingest_media(&path).await? {
        IngestOutcome::NoTranscript => {
            eprintln!("Could not transcribe audio.");
            Ok(())
        }
        IngestOutcome::NoTasks => {
            eprintln!("No tasks extracted.");
            Ok(())
        }
        IngestOutcome::Added(count) => {
            eprintln!("Added {} task(s) from {}.", count, path.display());
            print_tasks(&tracker).await
        }
    }
}

/// Remove the task at a 1-based row position
async fn complete_task(row: usize) -> Result<()> {
    if row == 0 {
        anyhow::bail!("Rows are numbered from 1");
    }

    let tracker = tracker()?;
    let removed = tracker.remove(row - 1).await?;
    eprintln!("Done: {}", removed.text);
    print_tasks(&tracker).await
}

/// Print the current ranked task list
async fn list_tasks() -> Result<()> {
    let tracker = tracker()?;
    print_tasks(&tracker).await
}

/// Run one ranking pass and print the result
async fn rank_tasks() -> Result<()> {
    let tracker = tracker()?;
    tracker.rank_now().await?;
    print_tasks(&tracker).await
}

/// Render the stored list in ranked order
async fn print_tasks(tracker: &Tracker) -> Result<()> {
    let tasks = tracker.tasks().await;

    if tasks.is_empty() {
        println!("No tasks. Use 'taskpilot add <text>' to create one.");
        return Ok(());
    }

    println!("{:<4} {:<7} {:<7} TASK", "ROW", "SCORE", "SOURCE");
    println!("{}", "-".repeat(60));
    for (i, task) in tasks.iter().enumerate() {
        println!(
            "{:<4} {:<7} {:<7} {}",
            i + 1,
            task.priority_score,
            task.source.to_string(),
            task.text
        );
    }

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("taskpilot configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:          {}", cfg.home.display());
    println!("  Tasks file:    {}", cfg.tasks_path().display());
    println!("  Whisper model: {}", cfg.whisper_model.display());
    println!();
    println!("Model:");
    println!("  Name:   {}", cfg.model);
    println!("  Binary: {}", cfg.ollama_binary);

    Ok(())
}
