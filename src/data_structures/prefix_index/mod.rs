//! Prefix Index Implementation
//!
//! This module provides a ternary search tree holding a vocabulary of
//! normalized terms (words or short phrases) for autocomplete. It supports
//! exact membership checks, sorted enumeration, and two completion policies:
//!
//! * [`PrefixIndex::complete_prefix`] returns the lexicographically smallest
//!   stored term that starts with the prefix.
//! * [`PrefixIndex::best_completion`] returns the stored term with the highest
//!   priority under the prefix, used to rank suggestions by frequency.
//!
//! Terms are normalized before every operation: surrounding whitespace is
//! trimmed and letters are folded with the ASCII case fold. Interior
//! whitespace is kept, so phrases such as `"new york"` are ordinary terms.
//! Non-ASCII characters are compared by code point without folding.
//!
//! # Example
//!
//! ```
//! use hoku_complete::data_structures::prefix_index::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert_with_priority("cat", 1).unwrap();
//! index.insert_with_priority("car", 5).unwrap();
//! index.insert_with_priority("care", 3).unwrap();
//!
//! assert!(index.contains(" Cat ").unwrap());
//! assert_eq!(index.complete_prefix("ca").unwrap().as_deref(), Some("car"));
//! assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("car"));
//! assert_eq!(index.sorted_terms(), vec!["car", "care", "cat"]);
//! ```
//!
//! # Stack usage
//!
//! Every walk is a loop or uses an explicit stack, including dropping the
//! tree, so vocabulary size never translates into call-stack depth.

mod error;
mod node;


use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, error, trace};

pub use error::{PrefixIndexError, PrefixIndexResult};
use node::Node;

use super::TextFiller;

/// Trims surrounding whitespace and applies the ASCII case fold.
///
/// # Errors
///
/// Returns [`PrefixIndexError::InvalidTerm`] when nothing but whitespace remains.
pub fn normalize_term(term: &str) -> PrefixIndexResult<String> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(PrefixIndexError::InvalidTerm(term.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// Ternary search tree over normalized terms.
///
/// Key features:
/// * Case- and surrounding-whitespace-insensitive lookups
/// * First-match and priority-weighted prefix completion
/// * Sorted enumeration of the whole vocabulary or a prefix of it
/// * Insert-only: terms are never removed and priorities never decrease
pub struct PrefixIndex {
    /// Root of the tree, `None` while empty
    root: Option<Box<Node>>,

    /// Number of distinct stored terms
    count: usize,
}

/// Pending work for the in-order walk in [`collect_terms`].
enum Step<'a> {
    /// Schedule a node's less branch, the node itself, then its greater branch
    Enter(&'a Node, usize),
    /// Emit the node if it ends a term and schedule its next branch
    Visit(&'a Node, usize),
}

impl PrefixIndex {
    /// Creates a new empty `PrefixIndex`.
    pub fn new() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }

    /// Returns the number of distinct stored terms.
    pub fn size(&self) -> usize {
        self.count
    }

    /// Returns `true` if no term has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Inserts a term with priority 0.
    ///
    /// See [`PrefixIndex::insert_with_priority`].
    pub fn insert<T: AsRef<str>>(&mut self, term: T) -> PrefixIndexResult<bool> {
        self.insert_with_priority(term, 0)
    }

    /// Inserts a term with the given priority.
    ///
    /// Every node on the term's equal-branch path has its priority raised to
    /// at least `priority`. Inserting a term that is already stored changes
    /// nothing, including its priority.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The term was new and has been stored.
    /// * `Ok(false)` - The term was already present.
    /// * `Err(PrefixIndexError::InvalidTerm)` - The term is empty after trimming.
    pub fn insert_with_priority<T: AsRef<str>>(
        &mut self,
        term: T,
        priority: u32,
    ) -> PrefixIndexResult<bool> {
        let term = normalize_term(term.as_ref())?;
        let chars: Vec<char> = term.chars().collect();

        // A stored term keeps the priority it was first inserted with.
        if self.find(&chars).is_some_and(|node| node.is_term) {
            trace!(term = %term, "term already stored, insert ignored");
            return Ok(false);
        }

        let mut link = &mut self.root;
        let mut depth = 0;

        while let Some(node) = link {
            match node.compare(chars[depth]) {
                Ordering::Less => link = &mut node.less,
                Ordering::Greater => link = &mut node.greater,
                Ordering::Equal => {
                    node.priority = node.priority.max(priority);
                    depth += 1;
                    if depth == chars.len() {
                        node.is_term = true;
                        self.count += 1;
                        debug!(term = %term, priority, "stored term on existing path");
                        return Ok(true);
                    }
                    link = &mut node.next;
                }
            }
        }

        // Fell off the existing structure: grow a fresh chain for the rest
        *link = Node::chain(&chars[depth..], priority);
        self.count += 1;
        debug!(
            term = %term,
            priority,
            new_nodes = chars.len() - depth,
            "stored term"
        );

        Ok(true)
    }

    /// Checks whether a term is stored.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if the normalized term is stored.
    /// * `Err(PrefixIndexError::InvalidTerm)` - The term is empty after trimming.
    pub fn contains<T: AsRef<str>>(&self, term: T) -> PrefixIndexResult<bool> {
        let term = normalize_term(term.as_ref())?;
        let chars: Vec<char> = term.chars().collect();
        Ok(self.find(&chars).is_some_and(|node| node.is_term))
    }

    /// Completes a prefix to the lexicographically smallest stored term
    /// starting with it.
    ///
    /// The prefix itself is returned when it is a stored term.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(term))` - The smallest completion.
    /// * `Ok(None)` - No stored term starts with the prefix.
    /// * `Err(PrefixIndexError::InvalidTerm)` - The prefix is empty after trimming.
    /// * `Err(PrefixIndexError::BrokenChain)` - The tree is corrupt.
    pub fn complete_prefix<T: AsRef<str>>(&self, prefix: T) -> PrefixIndexResult<Option<String>> {
        let prefix = normalize_term(prefix.as_ref())?;
        let chars: Vec<char> = prefix.chars().collect();

        let Some(anchor) = self.find(&chars) else {
            return Ok(None);
        };

        let mut completion = prefix.clone();
        let mut node = anchor;
        while !node.is_term {
            let Some(group) = node.next.as_deref() else {
                return Err(broken_chain(&prefix));
            };
            node = smallest(group);
            completion.push(node.letter);
        }

        Ok(Some(completion))
    }

    /// Completes a prefix to the stored term with the highest priority.
    ///
    /// Ties between sibling characters go to the smaller character. When a
    /// stored term and a longer term extending it share the top priority, the
    /// longer term wins, since the walk keeps following the chain for as long
    /// as it still reaches the top priority.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(term))` - The highest-priority completion.
    /// * `Ok(None)` - No stored term starts with the prefix.
    /// * `Err(PrefixIndexError::InvalidTerm)` - The prefix is empty after trimming.
    /// * `Err(PrefixIndexError::BrokenChain)` - The tree is corrupt.
    pub fn best_completion<T: AsRef<str>>(&self, prefix: T) -> PrefixIndexResult<Option<String>> {
        let prefix = normalize_term(prefix.as_ref())?;
        let chars: Vec<char> = prefix.chars().collect();

        let Some(anchor) = self.find(&chars) else {
            return Ok(None);
        };

        // Every term under the prefix passed through the anchor, so its
        // priority is the best one reachable below it.
        let floor = anchor.priority;
        let mut completion = prefix.clone();
        let mut node = anchor;

        while let Some(choice) = first_reaching(node.next.as_deref(), floor) {
            completion.push(choice.letter);
            node = choice;
        }

        if !node.is_term {
            return Err(broken_chain(&prefix));
        }

        trace!(prefix = %prefix, completion = %completion, priority = floor, "best completion");
        Ok(Some(completion))
    }

    /// Returns every stored term in ascending order.
    pub fn sorted_terms(&self) -> Vec<String> {
        let mut terms = Vec::with_capacity(self.count);
        collect_terms(self.root.as_deref(), "", &mut terms);
        terms
    }

    /// Returns every stored term starting with `prefix`, in ascending order.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Matching terms, empty if there are none.
    /// * `Err(PrefixIndexError::InvalidTerm)` - The prefix is empty after trimming.
    pub fn terms_with_prefix<T: AsRef<str>>(&self, prefix: T) -> PrefixIndexResult<Vec<String>> {
        let prefix = normalize_term(prefix.as_ref())?;
        let chars: Vec<char> = prefix.chars().collect();

        let mut terms = Vec::new();
        if let Some(anchor) = self.find(&chars) {
            if anchor.is_term {
                terms.push(prefix.clone());
            }
            collect_terms(anchor.next.as_deref(), &prefix, &mut terms);
        }

        Ok(terms)
    }

    /// Follows equal branches for every character of `chars` and returns the
    /// node matching the last one.
    fn find(&self, chars: &[char]) -> Option<&Node> {
        if chars.is_empty() {
            return None;
        }

        let mut link = self.root.as_deref();
        let mut depth = 0;

        while let Some(node) = link {
            match node.compare(chars[depth]) {
                Ordering::Less => link = node.less.as_deref(),
                Ordering::Greater => link = node.greater.as_deref(),
                Ordering::Equal => {
                    depth += 1;
                    if depth == chars.len() {
                        return Some(node);
                    }
                    link = node.next.as_deref();
                }
            }
        }

        None
    }
}

/// Leftmost node of a sibling group, i.e. the one holding the smallest letter.
fn smallest(mut node: &Node) -> &Node {
    while let Some(less) = node.less.as_deref() {
        node = less;
    }
    node
}

/// Finds the first node of a sibling group, in letter order, whose priority
/// reaches `floor`.
fn first_reaching(group: Option<&Node>, floor: u32) -> Option<&Node> {
    let mut stack = Vec::new();
    let mut current = group;

    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.less.as_deref();
        }

        let node = stack.pop()?;
        if node.priority >= floor {
            return Some(node);
        }
        current = node.greater.as_deref();
    }
}

/// Appends every term stored in `group` to `out` in ascending order, each one
/// prefixed with `prefix`.
fn collect_terms<'a>(group: Option<&'a Node>, prefix: &str, out: &mut Vec<String>) {
    let mut path: Vec<char> = prefix.chars().collect();
    let base = path.len();
    let mut stack: Vec<Step<'a>> = group.map(|node| Step::Enter(node, base)).into_iter().collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node, depth) => {
                if let Some(greater) = node.greater.as_deref() {
                    stack.push(Step::Enter(greater, depth));
                }
                stack.push(Step::Visit(node, depth));
                if let Some(less) = node.less.as_deref() {
                    stack.push(Step::Enter(less, depth));
                }
            }
            Step::Visit(node, depth) => {
                path.truncate(depth);
                path.push(node.letter);
                if node.is_term {
                    out.push(path.iter().collect());
                }
                if let Some(next) = node.next.as_deref() {
                    stack.push(Step::Enter(next, depth + 1));
                }
            }
        }
    }
}

fn broken_chain(prefix: &str) -> PrefixIndexError {
    error!(prefix = %prefix, "completion chain ended without a stored term");
    PrefixIndexError::BrokenChain {
        prefix: prefix.to_string(),
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrefixIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixIndex")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl Drop for PrefixIndex {
    fn drop(&mut self) {
        // Unlink nodes one by one; the default recursive drop would follow
        // long chains on the call stack.
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.take_children().into_iter().flatten());
        }
    }
}

impl TextFiller for PrefixIndex {
    fn size(&self) -> usize {
        PrefixIndex::size(self)
    }

    fn is_empty(&self) -> bool {
        PrefixIndex::is_empty(self)
    }

    fn insert(&mut self, term: &str) -> PrefixIndexResult<bool> {
        PrefixIndex::insert(self, term)
    }

    fn insert_with_priority(&mut self, term: &str, priority: u32) -> PrefixIndexResult<bool> {
        PrefixIndex::insert_with_priority(self, term, priority)
    }

    fn contains(&self, term: &str) -> PrefixIndexResult<bool> {
        PrefixIndex::contains(self, term)
    }

    fn complete_prefix(&self, prefix: &str) -> PrefixIndexResult<Option<String>> {
        PrefixIndex::complete_prefix(self, prefix)
    }

    fn best_completion(&self, prefix: &str) -> PrefixIndexResult<Option<String>> {
        PrefixIndex::best_completion(self, prefix)
    }

    fn sorted_terms(&self) -> Vec<String> {
        PrefixIndex::sorted_terms(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(terms: &[(&str, u32)]) -> PrefixIndex {
        let mut index = PrefixIndex::new();
        for (term, priority) in terms {
            index.insert_with_priority(term, *priority).unwrap();
        }
        index
    }

    #[test]
    fn test_empty_index() {
        let index = PrefixIndex::new();

        assert_eq!(index.size(), 0);
        assert!(index.is_empty());
        assert!(index.sorted_terms().is_empty());
        assert!(!index.contains("anything").unwrap());
        assert_eq!(index.complete_prefix("a").unwrap(), None);
        assert_eq!(index.best_completion("a").unwrap(), None);
        assert!(index.terms_with_prefix("a").unwrap().is_empty());
    }

    #[test]
    fn test_basic_operations() {
        let mut index = PrefixIndex::new();

        assert!(index.insert("hello").unwrap());
        assert!(index.insert("help").unwrap());
        assert!(index.insert("he").unwrap());
        assert_eq!(index.size(), 3);
        assert!(!index.is_empty());

        assert!(index.contains("hello").unwrap());
        assert!(index.contains("he").unwrap());
        assert!(!index.contains("hel").unwrap());
        assert!(!index.contains("helping").unwrap());
        assert!(!index.contains("x").unwrap());
    }

    #[test]
    fn test_normalization() {
        let mut index = PrefixIndex::new();
        index.insert("  Cat\t").unwrap();

        assert!(index.contains("cat").unwrap());
        assert!(index.contains(" CAT ").unwrap());
        assert_eq!(index.contains(" Cat ").unwrap(), index.contains("cat").unwrap());
        assert_eq!(index.sorted_terms(), vec!["cat"]);
    }

    #[test]
    fn test_phrases_keep_interior_whitespace() {
        let mut index = PrefixIndex::new();
        index.insert("New York").unwrap();
        index.insert("new").unwrap();

        assert!(index.contains("new york").unwrap());
        assert!(!index.contains("newyork").unwrap());
        assert_eq!(index.sorted_terms(), vec!["new", "new york"]);
        // Surrounding whitespace is trimmed, so "new " is the stored term "new"
        assert_eq!(index.complete_prefix("new ").unwrap().as_deref(), Some("new"));
        assert_eq!(index.complete_prefix("new y").unwrap().as_deref(), Some("new york"));
    }

    #[test]
    fn test_invalid_terms() {
        let mut index = PrefixIndex::new();

        for bad in ["", "   ", "\t\n"] {
            assert!(matches!(index.insert(bad), Err(PrefixIndexError::InvalidTerm(_))));
            assert!(matches!(
                index.insert_with_priority(bad, 3),
                Err(PrefixIndexError::InvalidTerm(_))
            ));
            assert!(matches!(index.contains(bad), Err(PrefixIndexError::InvalidTerm(_))));
            assert!(matches!(
                index.complete_prefix(bad),
                Err(PrefixIndexError::InvalidTerm(_))
            ));
            assert!(matches!(
                index.best_completion(bad),
                Err(PrefixIndexError::InvalidTerm(_))
            ));
        }
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut index = PrefixIndex::new();

        assert!(index.insert_with_priority("car", 5).unwrap());
        assert!(!index.insert_with_priority("CAR ", 1).unwrap());
        assert_eq!(index.size(), 1);

        index.insert_with_priority("cat", 4).unwrap();
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("car"));
    }

    #[test]
    fn test_duplicate_insert_does_not_raise_priority() {
        let mut index = index_of(&[("car", 1), ("cat", 4)]);

        assert!(!index.insert_with_priority("car", 9).unwrap());
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("cat"));
    }

    #[test]
    fn test_complete_prefix_picks_smallest() {
        let index = index_of(&[("cat", 0), ("car", 0), ("care", 0)]);

        assert_eq!(index.complete_prefix("ca").unwrap().as_deref(), Some("car"));
        assert_eq!(index.complete_prefix("car").unwrap().as_deref(), Some("car"));
        assert_eq!(index.complete_prefix("care").unwrap().as_deref(), Some("care"));
        assert_eq!(index.complete_prefix("cat").unwrap().as_deref(), Some("cat"));
        assert_eq!(index.complete_prefix("CA").unwrap().as_deref(), Some("car"));
        assert_eq!(index.complete_prefix("cab").unwrap(), None);
        assert_eq!(index.complete_prefix("dog").unwrap(), None);
    }

    #[test]
    fn test_complete_prefix_descends_past_shorter_siblings() {
        let index = index_of(&[("zebra", 0), ("apple", 0), ("apricot", 0)]);

        assert_eq!(index.complete_prefix("a").unwrap().as_deref(), Some("apple"));
        assert_eq!(index.complete_prefix("apr").unwrap().as_deref(), Some("apricot"));
        assert_eq!(index.complete_prefix("z").unwrap().as_deref(), Some("zebra"));
    }

    #[test]
    fn test_best_completion_by_priority() {
        let index = index_of(&[("cat", 1), ("car", 5), ("care", 3)]);

        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("car"));
        assert_eq!(index.best_completion("c").unwrap().as_deref(), Some("car"));
        assert_eq!(index.best_completion("car").unwrap().as_deref(), Some("car"));
        assert_eq!(index.best_completion("cat").unwrap().as_deref(), Some("cat"));
        assert_eq!(index.best_completion("dog").unwrap(), None);
    }

    #[test]
    fn test_best_completion_prefers_deeper_high_priority() {
        let index = index_of(&[("car", 1), ("care", 3), ("cat", 2)]);
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("care"));
    }

    #[test]
    fn test_best_completion_tie_goes_to_smaller_letter() {
        let index = index_of(&[("cap", 2), ("car", 2)]);
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("cap"));

        let index = index_of(&[("car", 2), ("cap", 2)]);
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("cap"));

        let index = index_of(&[("cat", 7), ("cab", 7), ("cay", 7)]);
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("cab"));
    }

    #[test]
    fn test_best_completion_looks_past_low_siblings() {
        // "m" is the sibling root; the winner sits deep in its greater branch.
        let index = index_of(&[("xm", 1), ("xa", 0), ("xz", 0), ("xq", 9), ("xp", 2)]);
        assert_eq!(index.best_completion("x").unwrap().as_deref(), Some("xq"));
    }

    #[test]
    fn test_best_completion_prefix_is_top_term() {
        let index = index_of(&[("ca", 8), ("cat", 1), ("cab", 2)]);
        assert_eq!(index.best_completion("ca").unwrap().as_deref(), Some("ca"));
        assert_eq!(index.best_completion("c").unwrap().as_deref(), Some("ca"));
    }

    #[test]
    fn test_priorities_propagate_only_along_equal_branch() {
        let index = index_of(&[("b", 1), ("a", 9)]);

        let root = index.root.as_deref().unwrap();
        assert_eq!(root.letter, 'b');
        assert_eq!(root.priority, 1);
        assert_eq!(root.less.as_deref().unwrap().priority, 9);
    }

    #[test]
    fn test_sorted_terms() {
        let index = index_of(&[
            ("pear", 0),
            ("apple", 3),
            ("peach", 1),
            ("app", 0),
            ("banana", 2),
            ("pea", 0),
        ]);

        assert_eq!(
            index.sorted_terms(),
            vec!["app", "apple", "banana", "pea", "peach", "pear"]
        );
    }

    #[test]
    fn test_terms_with_prefix() {
        let index = index_of(&[("pear", 0), ("peach", 0), ("pea", 0), ("plum", 0)]);

        assert_eq!(
            index.terms_with_prefix("pe").unwrap(),
            vec!["pea", "peach", "pear"]
        );
        assert_eq!(
            index.terms_with_prefix("PEA").unwrap(),
            vec!["pea", "peach", "pear"]
        );
        assert_eq!(index.terms_with_prefix("pl").unwrap(), vec!["plum"]);
        assert!(index.terms_with_prefix("q").unwrap().is_empty());
        assert!(matches!(
            index.terms_with_prefix(" "),
            Err(PrefixIndexError::InvalidTerm(_))
        ));
    }

    #[test]
    fn test_broken_chain_is_reported() {
        let mut index = PrefixIndex::new();
        let mut head = Node::new('c', 0);
        head.next = Some(Box::new(Node::new('a', 0)));
        index.root = Some(Box::new(head));

        assert_eq!(
            index.complete_prefix("c"),
            Err(PrefixIndexError::BrokenChain {
                prefix: "c".to_string()
            })
        );
        assert_eq!(
            index.best_completion("c"),
            Err(PrefixIndexError::BrokenChain {
                prefix: "c".to_string()
            })
        );
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let mut index = PrefixIndex::new();
        let long_term = "a".repeat(200_000);
        index.insert(&long_term).unwrap();

        assert!(index.contains(&long_term).unwrap());
        assert_eq!(index.complete_prefix("a").unwrap().map(|t| t.len()), Some(200_000));
        assert_eq!(index.best_completion("aaa").unwrap().map(|t| t.len()), Some(200_000));
        assert_eq!(index.sorted_terms().len(), 1);
    }

    #[test]
    fn test_degenerate_sibling_spine() {
        let mut index = PrefixIndex::new();
        let words: Vec<String> = (0..10_000u32)
            .map(|i| char::from_u32(0x4e00 + i).unwrap().to_string())
            .collect();
        for word in &words {
            index.insert(word).unwrap();
        }

        assert_eq!(index.size(), words.len());
        assert_eq!(index.sorted_terms(), words);
    }

    #[test]
    fn test_text_filler_contract() {
        fn exercise<F: TextFiller>(filler: &mut F) {
            assert!(filler.is_empty());
            filler.insert("dog").unwrap();
            filler.insert_with_priority("door", 4).unwrap();
            assert_eq!(filler.size(), 2);
            assert!(filler.contains("DOG").unwrap());
            assert_eq!(filler.complete_prefix("do").unwrap().as_deref(), Some("dog"));
            assert_eq!(filler.best_completion("do").unwrap().as_deref(), Some("door"));
            assert_eq!(filler.sorted_terms(), vec!["dog", "door"]);
        }

        exercise(&mut PrefixIndex::new());
    }
}
