//! Configuration loading, validation, and management for Advisor.
//!
//! Loads configuration from `~/.advisor/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.advisor/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // Plain values must precede the table sections for TOML output.
    /// Directory holding student/course/enrollment fixture data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Text-generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Memory configuration
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Recommendation policy
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Requirement-retrieval settings
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

fn default_data_dir() -> PathBuf {
    AppConfig::config_dir().join("data")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier passed to the text-generation collaborator
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, 0.0 through 2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token ceiling per stage
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// "file", "in_memory", or "sqlite"
    #[serde(default = "default_memory_backend")]
    pub backend: String,

    /// Directory for the file backend / sqlite database
    #[serde(default = "default_memory_dir")]
    pub dir: PathBuf,

    /// Turns retained per student
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    /// Answer characters carried into prompt context per turn
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_memory_backend() -> String {
    "file".into()
}
fn default_memory_dir() -> PathBuf {
    AppConfig::config_dir().join("memory")
}
fn default_history_cap() -> usize {
    10
}
fn default_context_chars() -> usize {
    200
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            backend: default_memory_backend(),
            dir: default_memory_dir(),
            history_cap: default_history_cap(),
            context_chars: default_context_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Credit ceiling for one semester's recommendation
    #[serde(default = "default_max_credits")]
    pub max_credits: u8,

    /// Candidate rows fetched before prefix dedup
    #[serde(default = "default_pool_limit")]
    pub pool_limit: usize,

    /// Graduation thresholds, policy constants
    #[serde(default = "default_required_total")]
    pub required_total: u16,

    #[serde(default = "default_required_major")]
    pub required_major: u16,

    #[serde(default = "default_required_liberal")]
    pub required_liberal: u16,
}

fn default_max_credits() -> u8 {
    21
}
fn default_pool_limit() -> usize {
    50
}
fn default_required_total() -> u16 {
    130
}
fn default_required_major() -> u16 {
    60
}
fn default_required_liberal() -> u16 {
    30
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_credits: default_max_credits(),
            pool_limit: default_pool_limit(),
            required_total: default_required_total(),
            required_major: default_required_major(),
            required_liberal: default_required_liberal(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Passages fetched per requirement query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Passages above this similarity are included directly
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,
}

fn default_top_k() -> usize {
    5
}
fn default_similarity_threshold() -> f32 {
    0.5
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.advisor/config.toml).
    ///
    /// Environment variable overrides:
    /// - `ADVISOR_MODEL`
    /// - `ADVISOR_DATA_DIR`
    /// - `ADVISOR_MEMORY_DIR`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(model) = std::env::var("ADVISOR_MODEL") {
            config.generation.model = model;
        }
        if let Ok(dir) = std::env::var("ADVISOR_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("ADVISOR_MEMORY_DIR") {
            config.memory.dir = PathBuf::from(dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".advisor")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "generation.model must not be empty".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "generation.max_tokens must be at least 1".into(),
            ));
        }
        if !matches!(self.memory.backend.as_str(), "file" | "in_memory" | "sqlite") {
            return Err(ConfigError::ValidationError(format!(
                "unknown memory backend '{}' (expected file, in_memory, or sqlite)",
                self.memory.backend
            )));
        }
        if self.memory.history_cap == 0 {
            return Err(ConfigError::ValidationError(
                "memory.history_cap must be at least 1".into(),
            ));
        }
        if self.recommendation.max_credits == 0 {
            return Err(ConfigError::ValidationError(
                "recommendation.max_credits must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.retrieval.similarity_threshold) {
            return Err(ConfigError::ValidationError(
                "retrieval.similarity_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "retrieval.top_k must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            generation: GenerationConfig::default(),
            memory: MemoryConfig::default(),
            recommendation: RecommendationConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.memory.history_cap, 10);
        assert_eq!(config.recommendation.max_credits, 21);
        assert_eq!(config.retrieval.top_k, 5);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.generation.model, config.generation.model);
        assert_eq!(parsed.memory.backend, config.memory.backend);
    }

    #[test]
    fn unknown_backend_rejected() {
        let config = AppConfig {
            memory: MemoryConfig {
                backend: "redis".into(),
                ..MemoryConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_rejected() {
        let config = AppConfig {
            generation: GenerationConfig {
                temperature: 2.5,
                ..GenerationConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_similarity_rejected() {
        let config = AppConfig {
            retrieval: RetrievalConfig {
                similarity_threshold: 1.5,
                ..RetrievalConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().memory.backend, "file");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[generation]\nmodel = \"custom-model\"\n\n[memory]\nbackend = \"sqlite\"\n",
        )
        .unwrap();
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.generation.model, "custom-model");
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.memory.backend, "sqlite");
        assert_eq!(config.memory.history_cap, 10);
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("[generation]"));
        assert!(toml_str.contains("temperature"));
        assert!(toml_str.contains("max_credits"));
        assert!(toml_str.contains("history_cap"));
    }
}
