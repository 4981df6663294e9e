//! Loader configuration module.
//!
//! This module defines how vocabulary files are parsed into index insertions.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Vocabulary loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Character separating a term from its priority on one line
    pub delimiter: char,

    /// Priority given to lines without a priority column
    pub default_priority: u32,

    /// Lines starting with this prefix are ignored (empty disables comments)
    pub comment_prefix: String,

    /// Skip malformed lines with a warning instead of aborting the load
    pub skip_invalid: bool,

    /// Maximum term length in characters (0 for unlimited)
    pub max_term_length: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            default_priority: 0,
            comment_prefix: "#".to_string(),
            skip_invalid: true,
            max_term_length: 0,
        }
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        // Terms may contain letters, digits and spaces, so none of them can split columns
        if self.delimiter.is_alphanumeric() || self.delimiter == ' ' {
            return Err(ConfigError::ValidationError(format!(
                "delimiter {:?} would split terms; use a tab or punctuation",
                self.delimiter
            )));
        }

        if !self.comment_prefix.is_empty() && self.comment_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "comment_prefix cannot be whitespace only".to_string(),
            ));
        }

        if self.comment_prefix.contains(self.delimiter) {
            return Err(ConfigError::ValidationError(
                "comment_prefix cannot contain the delimiter".to_string(),
            ));
        }

        Ok(())
    }
}
