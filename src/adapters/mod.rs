//! Adapter interfaces for external systems.
//!
//! The language model is reached through the `LanguageModel` trait so the
//! extraction and ranking paths can be driven by a scripted fake in tests.

pub mod ollama;

use anyhow::Result;
use async_trait::async_trait;

// Re-export the Ollama adapter
pub use ollama::OllamaAdapter;

/// Trait for generative language model backends
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Human-readable backend name
    fn name(&self) -> &str;

    /// Send a prompt and return the completion text.
    ///
    /// Best-effort contract: backends that fail to produce output return an
    /// empty string rather than an error, and callers treat empty output as
    /// "nothing extracted" / "ranking no-op".
    async fn generate(&self, prompt: &str) -> Result<String>;
}
