//! Test modules for Hoku Complete.
//!
//! This module contains the crate-level test suites:
//! - Query commands behind the binary
//! - Configuration loading, layering and validation
//! - Error conversions and reporting
//! - Vocabulary loading into the index
//! - Shared fixtures and proptest strategies


// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{vocabulary_strategy, TestFixture};
