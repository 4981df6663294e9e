//! Data structures for Hoku Complete.
//!
//! This module contains the autocomplete index and the capability trait
//! that the loader and the CLI program against.

pub mod prefix_index;
pub mod text_filler;

// Re-export common data structures
pub use prefix_index::{normalize_term, PrefixIndex, PrefixIndexError, PrefixIndexResult};
pub use text_filler::TextFiller;
