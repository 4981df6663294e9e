//! Node implementation for the prefix index.
//!
//! Each node holds one character of some stored term. Siblings holding
//! alternative characters at the same depth hang off `less` / `greater`,
//! while `next` continues the term with its following character.

use std::cmp::Ordering;

/// Owned link to a child node.
pub(crate) type Link = Option<Box<Node>>;

/// A node in the ternary search tree.
#[derive(Debug)]
pub(crate) struct Node {
    /// Character stored at this position (already case-folded)
    pub letter: char,

    /// Whether the equal-branch path ending here spells a stored term
    pub is_term: bool,

    /// Highest priority of any term inserted through this node's equal branch
    pub priority: u32,

    /// Sibling with a smaller letter
    pub less: Link,

    /// Continuation with the next character of the term
    pub next: Link,

    /// Sibling with a greater letter
    pub greater: Link,
}

impl Node {
    /// Creates a detached node.
    pub fn new(letter: char, priority: u32) -> Self {
        Self {
            letter,
            is_term: false,
            priority,
            less: None,
            next: None,
            greater: None,
        }
    }

    /// Builds a `next`-linked chain spelling `suffix`, every node stamped
    /// with `priority` and the last one marked as a term.
    ///
    /// Returns `None` for an empty suffix.
    pub fn chain(suffix: &[char], priority: u32) -> Link {
        suffix.iter().rev().fold(None, |next, &letter| {
            let mut node = Node::new(letter, priority);
            node.is_term = next.is_none();
            node.next = next;
            Some(Box::new(node))
        })
    }

    /// Orders `letter` against this node's letter using the ASCII case fold.
    pub fn compare(&self, letter: char) -> Ordering {
        compare_letters(letter, self.letter)
    }

    /// Moves all children out of the node, leaving it a leaf.
    pub fn take_children(&mut self) -> [Link; 3] {
        [self.less.take(), self.next.take(), self.greater.take()]
    }
}

/// Case-insensitive character ordering shared by every tree walk.
pub(crate) fn compare_letters(a: char, b: char) -> Ordering {
    a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
}
