//! Hoku Complete Library
//!
//! This library contains an in-memory autocomplete index built on a ternary
//! search tree, plus the configuration, error handling and vocabulary
//! loading that surround it. The `hoku` binary is a thin front end over it.
//!
//! # Architecture
//!
//! - [`data_structures::PrefixIndex`] stores normalized terms with priorities
//!   and answers membership, enumeration and completion queries
//! - [`data_structures::TextFiller`] is the contract callers program against
//! - [`loader::TermLoader`] turns term lists into insertions
//! - [`commands`] holds the query logic behind the `hoku` binary
//! - [`config`] and [`error`] hold the layered configuration and error types

// Re-export public modules
pub mod commands;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod loader;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Hoku Complete.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
