//! Configuration for taskpilot paths and model settings.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (TASKPILOT_HOME, TASKPILOT_MODEL)
//! 2. Config file (.taskpilot/config.yaml)
//! 3. Defaults (~/.taskpilot, mistral:latest)
//!
//! Config file discovery:
//! - Searches current directory and parents for .taskpilot/config.yaml
//! - Paths in the config file are relative to the config file's directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Default model passed to `ollama run`
const DEFAULT_MODEL: &str = "mistral:latest";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub model: Option<ModelConfig>,
    #[serde(default)]
    pub whisper: Option<WhisperConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory holding tasks.json (relative to the config file)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model name passed to `ollama run`
    pub name: Option<String>,
    /// Ollama binary name or path
    pub binary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperConfig {
    /// Path to the ggml whisper model file
    pub model: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the taskpilot home (state directory)
    pub home: PathBuf,
    /// Model name for the language-model adapter
    pub model: String,
    /// Ollama binary name or path
    pub ollama_binary: String,
    /// Path to the whisper model file
    pub whisper_model: PathBuf,
    /// Path to the config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Path of the task list file
    pub fn tasks_path(&self) -> PathBuf {
        self.home.join("tasks.json")
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".taskpilot").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".taskpilot");

    let config_file = find_config_file();
    let parsed = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let home = if let Ok(env_home) = std::env::var("TASKPILOT_HOME") {
        PathBuf::from(env_home)
    } else if let Some(home_str) = parsed.as_ref().and_then(|c| c.paths.home.as_deref()) {
        let base = config_file
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(Path::new("."));
        resolve_path(base, home_str)
    } else {
        default_home
    };

    let model = if let Ok(env_model) = std::env::var("TASKPILOT_MODEL") {
        env_model
    } else {
        parsed
            .as_ref()
            .and_then(|c| c.model.as_ref())
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string())
    };

    let ollama_binary = parsed
        .as_ref()
        .and_then(|c| c.model.as_ref())
        .and_then(|m| m.binary.clone())
        .unwrap_or_else(|| "ollama".to_string());

    let whisper_model = parsed
        .as_ref()
        .and_then(|c| c.whisper.as_ref())
        .and_then(|w| w.model.as_ref())
        .map(|p| {
            let base = config_file
                .as_deref()
                .and_then(Path::parent)
                .unwrap_or(Path::new("."));
            resolve_path(base, p)
        })
        .unwrap_or_else(|| home.join("models").join("ggml-base.en.bin"));

    Ok(ResolvedConfig {
        home,
        model,
        ollama_binary,
        whisper_model,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}

/// Get the task list file path ($TASKPILOT_HOME/tasks.json)
pub fn tasks_path() -> Result<PathBuf> {
    Ok(config()?.tasks_path())
}

/// Get the whisper model file path
pub fn whisper_model_path() -> Result<PathBuf> {
    Ok(config()?.whisper_model.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".taskpilot");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
paths:
  home: ./
model:
  name: llama3:8b
  binary: /usr/local/bin/ollama
whisper:
  model: ./models/ggml-base.en.bin
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.paths.home, Some("./".to_string()));
        let model = config.model.unwrap();
        assert_eq!(model.name, Some("llama3:8b".to_string()));
        assert_eq!(model.binary, Some("/usr/local/bin/ollama".to_string()));
        assert_eq!(
            config.whisper.unwrap().model,
            Some("./models/ggml-base.en.bin".to_string())
        );
    }

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "paths: {}\n").unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(config.paths.home.is_none());
        assert!(config.model.is_none());
        assert!(config.whisper.is_none());
    }

    #[test]
    fn test_tasks_path_under_home() {
        let config = ResolvedConfig {
            home: PathBuf::from("/test/.taskpilot"),
            model: DEFAULT_MODEL.to_string(),
            ollama_binary: "ollama".to_string(),
            whisper_model: PathBuf::from("/test/.taskpilot/models/ggml-base.en.bin"),
            config_file: None,
        };

        assert_eq!(
            config.tasks_path(),
            PathBuf::from("/test/.taskpilot/tasks.json")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
