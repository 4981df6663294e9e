//! Query commands behind the `hoku` binary.
//!
//! Each function takes an already configured index or vocabulary path and
//! returns plain values, leaving printing to the caller.

use std::path::Path;

use tracing::info;

use crate::config::{HokuConfig, SuggestConfig};
use crate::data_structures::PrefixIndex;
use crate::error::HokuResult;
use crate::loader::{LoadReport, TermLoader};

/// Completion policy selected for a `complete` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionMode {
    /// Lexicographically smallest completion
    First,
    /// Highest-priority completion
    Weighted,
}

impl CompletionMode {
    /// Resolves the policy from the command line flags and configuration.
    ///
    /// `--weighted` and `--first` override `suggest.weighted`; with neither
    /// flag the configuration decides.
    pub fn resolve(weighted: bool, first: bool, config: &SuggestConfig) -> Self {
        if weighted || (!first && config.weighted) {
            Self::Weighted
        } else {
            Self::First
        }
    }
}

/// Loads the vocabulary at `path` into a fresh index.
pub fn load_index(config: &HokuConfig, path: &Path) -> HokuResult<(PrefixIndex, LoadReport)> {
    let mut index = PrefixIndex::new();
    let loader = TermLoader::new(config.loader.clone());
    let report = loader.load_path(path, &mut index)?;
    info!(
        terms = index.size(),
        inserted = report.inserted,
        duplicates = report.duplicates,
        skipped = report.skipped,
        delimiter = ?loader.config().delimiter,
        path = %path.display(),
        "index ready"
    );
    Ok((index, report))
}

/// Completes `prefix` with the given policy.
pub fn complete(
    index: &PrefixIndex,
    prefix: &str,
    mode: CompletionMode,
) -> HokuResult<Option<String>> {
    let completion = match mode {
        CompletionMode::First => index.complete_prefix(prefix)?,
        CompletionMode::Weighted => index.best_completion(prefix)?,
    };
    Ok(completion)
}

/// Lists stored terms, optionally restricted to a prefix.
///
/// A `limit` of 0 means no limit.
pub fn list(index: &PrefixIndex, prefix: Option<&str>, limit: usize) -> HokuResult<Vec<String>> {
    let mut terms = match prefix {
        Some(prefix) => index.terms_with_prefix(prefix)?,
        None => index.sorted_terms(),
    };
    if limit > 0 {
        terms.truncate(limit);
    }
    Ok(terms)
}
