//! Domain types for the task tracker.
//!
//! This module contains the single core data structure:
//! - Task: a unit of inferred or manually entered work

pub mod task;

// Re-export commonly used types
pub use task::{Task, TaskSource};
