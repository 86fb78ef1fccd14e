//! DescomplicaCV Configuration Management
//!
//! Handles configuration from environment variables and TOML files,
//! with defaults that reproduce the stock extraction behavior.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of skill phrases kept per résumé.
///
/// Product decision: the skill list is a short highlight, not an inventory.
pub const MAX_SKILLS: usize = 10;

/// Tokens of context kept on each side of an education/experience match.
pub const CONTEXT_WINDOW_TOKENS: usize = 3;

/// Shortest noun chunk (in tokens) considered a skill candidate.
pub const SKILL_CHUNK_MIN_TOKENS: usize = 2;

/// Longest noun chunk (in tokens) considered a skill candidate.
pub const SKILL_CHUNK_MAX_TOKENS: usize = 5;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Language model configuration
    pub model: ModelConfig,

    /// Extraction heuristics
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.extraction.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Only keys the lookup returns a value for are applied.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Model
        if let Some(path) = lookup("DCV_LEXICON_PATH") {
            config_path(&mut self.model.lexicon_path, path);
        }
        if let Some(language) = lookup("DCV_LANGUAGE") {
            self.model.language = language;
        }

        // Extraction
        if let Some(value) = lookup("DCV_MAX_SKILLS") {
            self.extraction.max_skills = parse_usize("DCV_MAX_SKILLS", value)?;
        }
        if let Some(value) = lookup("DCV_CONTEXT_WINDOW") {
            self.extraction.context_window = parse_usize("DCV_CONTEXT_WINDOW", value)?;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(value) = lookup("LOG_JSON") {
            self.logging.json_format = match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_JSON".to_string(),
                        value,
                    })
                }
            };
        }

        self.extraction.validate()?;
        Ok(self)
    }
}

fn config_path(slot: &mut Option<PathBuf>, value: String) {
    let value = value.trim();
    *slot = if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    };
}

fn parse_usize(key: &str, value: String) -> Result<usize, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
    })
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Language code of the model (only "pt" ships)
    pub language: String,

    /// Optional TOML lexicon replacing the embedded one
    pub lexicon_path: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            language: "pt".to_string(),
            lexicon_path: None,
        }
    }
}

/// Extraction heuristics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Cap on the skills list
    pub max_skills: usize,

    /// Tokens of context on each side of a match
    pub context_window: usize,

    /// Minimum noun chunk length for skills
    pub skill_chunk_min_tokens: usize,

    /// Maximum noun chunk length for skills
    pub skill_chunk_max_tokens: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_skills: MAX_SKILLS,
            context_window: CONTEXT_WINDOW_TOKENS,
            skill_chunk_min_tokens: SKILL_CHUNK_MIN_TOKENS,
            skill_chunk_max_tokens: SKILL_CHUNK_MAX_TOKENS,
        }
    }
}

impl ExtractionConfig {
    /// Check that the chunk length bounds describe a non-empty range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.skill_chunk_min_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                key: "extraction.skill_chunk_min_tokens".to_string(),
                value: "0".to_string(),
            });
        }
        if self.skill_chunk_min_tokens > self.skill_chunk_max_tokens {
            return Err(ConfigError::InvalidValue {
                key: "extraction.skill_chunk_max_tokens".to_string(),
                value: self.skill_chunk_max_tokens.to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
