//! Shared configuration for token aggregation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("continuation marker must not be empty")]
    EmptyContinuationMarker,

    #[error("reading config {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How sub-word tokens are joined back into entity text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Prefix the tokenizer puts on word-internal sub-words (`##` for WordPiece).
    pub continuation_marker: String,
    /// Insert a space before capitalised continuation tokens inside a case name,
    /// restoring word boundaries in party names.
    pub space_capitalized_case_name_tokens: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            continuation_marker: "##".to_string(),
            space_capitalized_case_name_tokens: true,
        }
    }
}

impl AggregationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.continuation_marker.is_empty() {
            return Err(ConfigError::EmptyContinuationMarker);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
