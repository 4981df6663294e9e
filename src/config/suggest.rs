//! Suggestion configuration module.
//!
//! This module defines how the command line front end queries the index.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound for `list_limit`.
const MAX_LIST_LIMIT: usize = 1_000_000;

/// Suggestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestConfig {
    /// Use priority-weighted completion unless a command overrides it
    pub weighted: bool,

    /// Maximum number of terms printed by `list` (0 for unlimited)
    pub list_limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            weighted: true,
            list_limit: 0,
        }
    }
}

impl Validate for SuggestConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.list_limit > MAX_LIST_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "suggest.list_limit".to_string(),
                message: format!("must be at most {MAX_LIST_LIMIT}"),
            });
        }
        Ok(())
    }
}
