//! Configuration types for the chatterbox engine.
//!
//! Configuration is a small JSON document. Every field has a default, so an
//! empty object (or no file at all) is a valid configuration.

use crate::conversation::DEFAULT_GREETING;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// First assistant message of every conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Range the simulated "typing" delay is drawn from.
    #[serde(default)]
    pub reply_delay: ReplyDelay,

    /// Fixed RNG seed for reproducible replies. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_greeting() -> String {
    DEFAULT_GREETING.into()
}

/// Half-open delay range `[min_ms, max_ms)` in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyDelay {
    /// Shortest delay (inclusive).
    #[serde(default = "default_min_ms")]
    pub min_ms: u64,
    /// Longest delay (exclusive).
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_min_ms() -> u64 {
    1000
}

fn default_max_ms() -> u64 {
    3000
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self {
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            reply_delay: ReplyDelay::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from a file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reply_delay.min_ms >= self.reply_delay.max_ms {
            return Err(ConfigError::InvalidDelay {
                min_ms: self.reply_delay.min_ms,
                max_ms: self.reply_delay.max_ms,
            });
        }
        if self.greeting.trim().is_empty() {
            return Err(ConfigError::EmptyGreeting);
        }
        Ok(())
    }
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parse error.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Delay range is empty.
    #[error("reply_delay.min_ms ({min_ms}) must be less than reply_delay.max_ms ({max_ms})")]
    InvalidDelay { min_ms: u64, max_ms: u64 },

    /// Greeting is blank.
    #[error("greeting must not be blank")]
    EmptyGreeting,
}
