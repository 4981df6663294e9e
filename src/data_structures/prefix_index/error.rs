//! Error types for the prefix index.
//!
//! This module defines the error types that can occur during prefix index operations.

/// Errors that can occur in prefix index operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrefixIndexError {
    /// The term was empty or contained only whitespace.
    #[error("Invalid term {0:?}: terms must contain a non-whitespace character")]
    InvalidTerm(String),

    /// A completion walk ran off the end of a chain without reaching a stored term.
    ///
    /// Trees built through `insert` never produce this; seeing it means the
    /// structure itself is corrupt.
    #[error("Completion chain under prefix '{prefix}' ends without a stored term")]
    BrokenChain {
        /// The normalized prefix being completed.
        prefix: String,
    },
}

/// Result type for prefix index operations
pub type PrefixIndexResult<T> = Result<T, PrefixIndexError>;
