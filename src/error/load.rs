//! Vocabulary loading error module.
//!
//! This module defines the errors raised while turning the lines of a term
//! list into index insertions.

use thiserror::Error;

use crate::data_structures::PrefixIndexError;

/// Errors that can occur while loading a vocabulary.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The priority column could not be parsed as a non-negative integer.
    #[error("Line {line}: invalid priority '{value}'")]
    InvalidPriority {
        /// 1-based line number
        line: usize,
        /// The raw priority text
        value: String,
    },

    /// The term was rejected by the index.
    #[error("Line {line}: {source}")]
    InvalidTerm {
        /// 1-based line number
        line: usize,
        /// The underlying index error
        #[source]
        source: PrefixIndexError,
    },

    /// The term exceeds the configured maximum length.
    #[error("Line {line}: term has {length} characters, limit is {max}")]
    TermTooLong {
        /// 1-based line number
        line: usize,
        /// Length of the offending term in characters
        length: usize,
        /// Configured limit
        max: usize,
    },

    /// Reading the source failed.
    #[error("Failed to read vocabulary: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    /// Line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidPriority { line, .. }
            | Self::InvalidTerm { line, .. }
            | Self::TermTooLong { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}
