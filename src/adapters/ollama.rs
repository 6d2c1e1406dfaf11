//! Ollama adapter for local model inference.
//!
//! Spawns `ollama run <model>` as a subprocess, feeding the prompt on stdin
//! and capturing stdout as the completion. Deliberately has no timeout and
//! no retry: one user action is in flight at a time and a slow model simply
//! blocks that action.

use std::process::Stdio;

use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::warn;

use super::LanguageModel;

/// Default model passed to `ollama run`
pub const DEFAULT_MODEL: &str = "mistral:latest";

/// Ollama adapter using subprocess mode
pub struct OllamaAdapter {
    /// Path to the ollama binary (default: "ollama")
    binary_path: String,

    /// Model name passed to `ollama run`
    model: String,
}

impl Default for OllamaAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl OllamaAdapter {
    /// Create an adapter for the given model with the default binary path
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            binary_path: "ollama".to_string(),
            model: model.into(),
        }
    }

    /// Create an adapter with a custom binary path
    pub fn with_binary_path(model: impl Into<String>, binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
            model: model.into(),
        }
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Spawn the subprocess and collect stdout.
    ///
    /// Non-zero exit is not special: whatever arrived on stdout is returned.
    /// Invalid UTF-8 bytes are dropped rather than rejected.
    async fn run_subprocess(&self, prompt: &str) -> std::io::Result<String> {
        let mut child = Command::new(&self.binary_path)
            .args(["run", &self.model])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Write prompt to stdin, then drop the handle to signal EOF
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(prompt.as_bytes()).await?;
        }

        let output = child.wait_with_output().await?;

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl LanguageModel for OllamaAdapter {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        match self.run_subprocess(prompt).await {
            Ok(output) => Ok(output),
            Err(e) => {
                // Subprocess failure flows through as empty output; the
                // caller degrades to "nothing extracted" or a ranking no-op.
                warn!(binary = %self.binary_path, model = %self.model, error = %e,
                    "model invocation failed");
                Ok(String::new())
            }
        }
    }
}
