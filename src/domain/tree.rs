use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::isomorphism::isomorphic_between;

/// Which child link of a binary node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Where a freshly built node gets attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Root,
    Child(Index, Side),
}

/// Binary tree node in the arena. Values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    /// Index of the left child in the arena, None if absent
    pub left: Option<Index>,
    /// Index of the right child in the arena, None if absent
    pub right: Option<Index>,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// Arena-based binary tree.
///
/// The arena owns every node. Anything else holding an `Index` into it
/// (a catalog, a work stack) only observes nodes, it never owns them.
/// Dropping the arena releases the whole tree at once.
#[derive(Debug, Clone)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for the empty tree
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Inserts a detached node; link it with [`TreeArena::attach`].
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, value: i64) -> Index {
        self.arena.insert(TreeNode::leaf(value))
    }

    /// Links `child` into `slot`. Returns false if the parent does not exist.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, slot: Slot, child: Index) -> bool {
        match slot {
            Slot::Root => {
                self.root = Some(child);
                true
            }
            Slot::Child(parent, side) => match self.arena.get_mut(parent) {
                Some(node) => {
                    match side {
                        Side::Left => node.left = Some(child),
                        Side::Right => node.right = Some(child),
                    }
                    true
                }
                None => false,
            },
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    /// Number of live nodes in the arena.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order iteration over the subtree rooted at `start`.
    pub fn iter_from(&self, start: Option<Index>) -> TreeIterator<'_> {
        TreeIterator::new(self, start)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get_node(idx) {
                max_depth = max_depth.max(depth);
                stack.extend(node.left.map(|c| (c, depth + 1)));
                stack.extend(node.right.map(|c| (c, depth + 1)));
            }
        }
        max_depth
    }

    /// Releases every node of the subtree rooted at `idx`, children first.
    ///
    /// The parent link (or the root) pointing at `idx` is cleared as well.
    /// Returns the number of released nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_subtree(&mut self, idx: Index) -> usize {
        let doomed: Vec<Index> = PostOrderIterator::new(self, Some(idx))
            .map(|(i, _)| i)
            .collect();

        if self.root == Some(idx) {
            self.root = None;
        } else {
            for (_, node) in self.arena.iter_mut() {
                if node.left == Some(idx) {
                    node.left = None;
                }
                if node.right == Some(idx) {
                    node.right = None;
                }
            }
        }

        doomed
            .into_iter()
            .filter_map(|i| self.arena.remove(i))
            .count()
    }
}

/// Two trees are equal when they have the same shape and values,
/// independent of how their arenas are laid out.
impl PartialEq for TreeArena {
    fn eq(&self, other: &Self) -> bool {
        isomorphic_between(self, self.root, other, other.root)
    }
}

impl Eq for TreeArena {}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Right first so that left is visited first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    self.stack.extend(node.right.map(|c| (c, false)));
                    self.stack.extend(node.left.map(|c| (c, false)));
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1(2(4, -), 3)
    fn sample() -> TreeArena {
        let mut tree = TreeArena::new();
        let one = tree.insert_node(1);
        let two = tree.insert_node(2);
        let three = tree.insert_node(3);
        let four = tree.insert_node(4);
        tree.attach(Slot::Root, one);
        tree.attach(Slot::Child(one, Side::Left), two);
        tree.attach(Slot::Child(one, Side::Right), three);
        tree.attach(Slot::Child(two, Side::Left), four);
        tree
    }

    #[test]
    fn given_tree_when_iterating_then_visits_in_preorder() {
        let tree = sample();
        let values: Vec<i64> = tree.iter().map(|(_, n)| n.value).collect();
        assert_eq!(values, vec![1, 2, 4, 3]);
    }

    #[test]
    fn given_tree_when_iterating_postorder_then_children_come_first() {
        let tree = sample();
        let values: Vec<i64> = tree.iter_postorder().map(|(_, n)| n.value).collect();
        assert_eq!(values, vec![4, 2, 3, 1]);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(TreeArena::new().depth(), 0);
    }

    #[test]
    fn given_subtree_when_removed_then_nodes_released_and_link_cleared() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        let two = tree.get_node(root).unwrap().left.unwrap();

        assert_eq!(tree.remove_subtree(two), 2);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get_node(root).unwrap().left, None);
        assert!(tree.get_node(two).is_none());
    }

    #[test]
    fn given_root_when_removed_then_tree_is_empty() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        assert_eq!(tree.remove_subtree(root), 4);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn given_missing_parent_when_attaching_then_returns_false() {
        let mut tree = sample();
        let root = tree.root().unwrap();
        let orphan = tree.insert_node(9);
        tree.remove_subtree(root);
        assert!(!tree.attach(Slot::Child(root, Side::Left), orphan));
    }
}
