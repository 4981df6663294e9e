//! Capability contract for autocomplete backends.
//!
//! Loaders and presentation code depend on this trait rather than on a
//! concrete tree, so any backend offering the same eight operations can
//! stand in for [`PrefixIndex`](super::PrefixIndex).

use super::prefix_index::PrefixIndexResult;

/// Operations an autocomplete backend offers to its callers.
///
/// Every term-taking method normalizes its input (trim, ASCII case fold)
/// and rejects input that is empty after trimming.
pub trait TextFiller {
    /// Number of distinct stored terms.
    fn size(&self) -> usize;

    /// `true` when no term is stored.
    fn is_empty(&self) -> bool;

    /// Stores a term with priority 0. Returns `false` if it was already present.
    fn insert(&mut self, term: &str) -> PrefixIndexResult<bool>;

    /// Stores a term with a priority. Returns `false` if it was already
    /// present, in which case its priority is left untouched.
    fn insert_with_priority(&mut self, term: &str, priority: u32) -> PrefixIndexResult<bool>;

    /// Exact membership test.
    fn contains(&self, term: &str) -> PrefixIndexResult<bool>;

    /// Lexicographically smallest stored term starting with `prefix`.
    fn complete_prefix(&self, prefix: &str) -> PrefixIndexResult<Option<String>>;

    /// Highest-priority stored term starting with `prefix`.
    fn best_completion(&self, prefix: &str) -> PrefixIndexResult<Option<String>>;

    /// All stored terms in ascending order.
    fn sorted_terms(&self) -> Vec<String>;
}
