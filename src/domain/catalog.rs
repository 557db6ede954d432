use generational_arena::Index;

use crate::domain::isomorphism::is_isomorphic;
use crate::domain::tree::TreeArena;

/// Append-only list of subtree roots, indexed by insertion order.
///
/// Entries are indices into a tree arena owned elsewhere: the input tree
/// during compression, the output tree during decompression. The catalog
/// never owns or frees the nodes it points at. A catalog lives for one
/// compress or decompress call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<Index>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subtree root and returns its position.
    pub fn push(&mut self, root: Index) -> usize {
        self.entries.push(root);
        self.entries.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<Index> {
        self.entries.get(position).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Index> + '_ {
        self.entries.iter().copied()
    }

    /// First cataloged subtree of `tree` isomorphic to `subtree`.
    ///
    /// Linear scan in insertion order; the earliest match wins.
    pub fn find_isomorphic(&self, tree: &TreeArena, subtree: Index) -> Option<usize> {
        self.entries
            .iter()
            .position(|&entry| is_isomorphic(tree, Some(subtree), Some(entry)))
    }
}
