use generational_arena::{Arena, Index};

use crate::domain::error::BackReferenceError;
use crate::domain::tree::{Side, Slot};

/// Node of a compressed DAG.
///
/// On the wire a back-reference is the negative value `-(position + 1)`;
/// in memory it is a variant of its own so it can never be mistaken for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DagNode {
    Internal {
        value: i64,
        left: Option<Index>,
        right: Option<Index>,
    },
    BackReference {
        /// 0-based catalog position of the referenced subtree
        position: usize,
    },
}

impl DagNode {
    pub fn internal(value: i64) -> Self {
        DagNode::Internal {
            value,
            left: None,
            right: None,
        }
    }

    /// The integer written for this node in the serialized DAG.
    pub fn wire_value(&self) -> i64 {
        match *self {
            DagNode::Internal { value, .. } => value,
            DagNode::BackReference { position } => encode_back_reference(position),
        }
    }

    pub fn is_back_reference(&self) -> bool {
        matches!(self, DagNode::BackReference { .. })
    }

    /// Left and right children; back-references have none.
    pub fn children(&self) -> (Option<Index>, Option<Index>) {
        match *self {
            DagNode::Internal { left, right, .. } => (left, right),
            DagNode::BackReference { .. } => (None, None),
        }
    }
}

/// Catalog position 0 becomes -1, 1 becomes -2, and so on.
pub fn encode_back_reference(position: usize) -> i64 {
    -(position as i64) - 1
}

/// Inverse of [`encode_back_reference`]; `value` must be negative.
pub fn decode_back_reference(value: i64) -> Result<usize, BackReferenceError> {
    value
        .checked_neg()
        .filter(|v| *v > 0)
        .and_then(|v| usize::try_from(v - 1).ok())
        .ok_or(BackReferenceError::Underflow { value })
}

/// Arena-based DAG produced by compression.
///
/// Structurally it is still a tree of allocations; sharing is expressed
/// through [`DagNode::BackReference`] leaves, not through shared indices.
#[derive(Debug, Clone)]
pub struct DagArena {
    arena: Arena<DagNode>,
    root: Option<Index>,
}

impl Default for DagArena {
    fn default() -> Self {
        Self::new()
    }
}

impl DagArena {
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

    pub fn insert_node(&mut self, node: DagNode) -> Index {
        self.arena.insert(node)
    }

    /// Links `child` into `slot`. Back-references cannot take children.
    pub fn attach(&mut self, slot: Slot, child: Index) -> bool {
        match slot {
            Slot::Root => {
                self.root = Some(child);
                true
            }
            Slot::Child(parent, side) => match self.arena.get_mut(parent) {
                Some(DagNode::Internal { left, right, .. }) => {
                    match side {
                        Side::Left => *left = Some(child),
                        Side::Right => *right = Some(child),
                    }
                    true
                }
                _ => false,
            },
        }
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&DagNode> {
        self.arena.get(idx)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> DagIterator<'_> {
        DagIterator {
            arena: self,
            stack: self.root.into_iter().collect(),
        }
    }

    pub fn back_reference_count(&self) -> usize {
        self.iter().filter(|(_, n)| n.is_back_reference()).count()
    }
}

/// Pre-order iteration over reachable DAG nodes.
pub struct DagIterator<'a> {
    arena: &'a DagArena,
    stack: Vec<Index>,
}

impl<'a> Iterator for DagIterator<'a> {
    type Item = (Index, &'a DagNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                let (left, right) = node.children();
                self.stack.extend(right);
                self.stack.extend(left);
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, -1)]
    #[case(1, -2)]
    #[case(41, -42)]
    fn given_position_when_encoding_then_value_is_strictly_negative(
        #[case] position: usize,
        #[case] value: i64,
    ) {
        assert_eq!(encode_back_reference(position), value);
        assert_eq!(decode_back_reference(value), Ok(position));
    }

    #[rstest]
    #[case(i64::MIN)]
    #[case(0)]
    #[case(7)]
    fn given_value_without_position_when_decoding_then_underflow(#[case] value: i64) {
        assert_eq!(
            decode_back_reference(value),
            Err(BackReferenceError::Underflow { value })
        );
    }

    #[test]
    fn given_back_reference_when_attaching_child_then_refused() {
        let mut dag = DagArena::new();
        let reference = dag.insert_node(DagNode::BackReference { position: 0 });
        let child = dag.insert_node(DagNode::internal(3));
        assert!(!dag.attach(Slot::Child(reference, Side::Left), child));
    }

    #[test]
    fn given_dag_when_iterating_then_back_references_are_leaves() {
        let mut dag = DagArena::new();
        let root = dag.insert_node(DagNode::internal(5));
        let left = dag.insert_node(DagNode::internal(3));
        let right = dag.insert_node(DagNode::BackReference { position: 1 });
        dag.attach(Slot::Root, root);
        dag.attach(Slot::Child(root, Side::Left), left);
        dag.attach(Slot::Child(root, Side::Right), right);

        let wire: Vec<i64> = dag.iter().map(|(_, n)| n.wire_value()).collect();
        assert_eq!(wire, vec![5, 3, -2]);
        assert_eq!(dag.back_reference_count(), 1);
    }
}
