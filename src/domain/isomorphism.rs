//! Structural comparison of subtrees.
//!
//! Two subtrees are isomorphic when they have the same shape and the same
//! value at every corresponding position. Comparison is value first, then
//! left, then right, and stops at the first mismatch.

use generational_arena::Index;

use crate::domain::tree::TreeArena;

/// Compares two subtrees of the same tree.
///
/// A subtree compared with itself is answered without walking it.
pub fn is_isomorphic(tree: &TreeArena, a: Option<Index>, b: Option<Index>) -> bool {
    isomorphic_between(tree, a, tree, b)
}

/// Compares a subtree of `lhs` with a subtree of `rhs`.
pub fn isomorphic_between(
    lhs: &TreeArena,
    a: Option<Index>,
    rhs: &TreeArena,
    b: Option<Index>,
) -> bool {
    let same_arena = std::ptr::eq(lhs, rhs);
    let mut pending = vec![(a, b)];

    while let Some(pair) = pending.pop() {
        match pair {
            (None, None) => continue,
            (Some(x), Some(y)) if same_arena && x == y => continue,
            (Some(x), Some(y)) => {
                let (Some(nx), Some(ny)) = (lhs.get_node(x), rhs.get_node(y)) else {
                    return false;
                };
                if nx.value != ny.value {
                    return false;
                }
                pending.push((nx.right, ny.right));
                pending.push((nx.left, ny.left));
            }
            _ => return false,
        }
    }
    true
}
