//! Indented text rendering of trees and DAGs (used by `--show` and debug logs).

use std::collections::HashMap;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::dag::{DagArena, DagNode};
use crate::domain::tree::TreeArena;

const ABSENT: &str = "·";

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Builds the leaves of a binary node. An absent child is only shown
/// when its sibling exists, so that left and right stay distinguishable.
fn binary_leaves(
    rendered: &mut HashMap<Index, Tree<String>>,
    left: Option<Index>,
    right: Option<Index>,
) -> Vec<Tree<String>> {
    if left.is_none() && right.is_none() {
        return Vec::new();
    }
    [left, right]
        .into_iter()
        .map(|child| {
            child
                .and_then(|c| rendered.remove(&c))
                .unwrap_or_else(|| Tree::new(ABSENT.to_string()))
        })
        .collect()
}

impl TreeNodeConvert for TreeArena {
    fn to_tree_string(&self) -> Tree<String> {
        let mut rendered: HashMap<Index, Tree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let leaves = binary_leaves(&mut rendered, node.left, node.right);
            rendered.insert(idx, Tree::new(node.value.to_string()).with_leaves(leaves));
        }
        self.root()
            .and_then(|root| rendered.remove(&root))
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

impl TreeNodeConvert for DagArena {
    fn to_tree_string(&self) -> Tree<String> {
        // Reverse pre-order visits every child before its parent
        let order: Vec<(Index, &DagNode)> = self.iter().collect();
        let mut rendered: HashMap<Index, Tree<String>> = HashMap::new();
        for &(idx, node) in order.iter().rev() {
            let tree = match *node {
                DagNode::Internal { value, left, right } => Tree::new(value.to_string())
                    .with_leaves(binary_leaves(&mut rendered, left, right)),
                DagNode::BackReference { position } => Tree::new(format!("-> #{}", position)),
            };
            rendered.insert(idx, tree);
        }
        self.root()
            .and_then(|root| rendered.remove(&root))
            .unwrap_or_else(|| Tree::new("Empty DAG".to_string()))
    }
}
