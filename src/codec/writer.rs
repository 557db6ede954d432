//! Writes trees and DAGs in the pre-order integer format, one value per line.

use generational_arena::Index;
use itertools::Itertools;

use crate::domain::dag::DagArena;
use crate::domain::tree::TreeArena;

/// Pre-order values of a tree, with `0` for every absent child.
pub fn tree_tokens(tree: &TreeArena) -> Vec<i64> {
    let mut tokens = Vec::with_capacity(2 * tree.len() + 1);
    let mut pending: Vec<Option<Index>> = vec![tree.root()];

    while let Some(slot) = pending.pop() {
        match slot.and_then(|idx| tree.get_node(idx)) {
            None => tokens.push(0),
            Some(node) => {
                tokens.push(node.value);
                pending.push(node.right);
                pending.push(node.left);
            }
        }
    }
    tokens
}

/// Pre-order values of a DAG. Back-references are written as their
/// negative wire value and are not followed by children.
pub fn dag_tokens(dag: &DagArena) -> Vec<i64> {
    let mut tokens = Vec::with_capacity(2 * dag.len() + 1);
    let mut pending: Vec<Option<Index>> = vec![dag.root()];

    while let Some(slot) = pending.pop() {
        match slot.and_then(|idx| dag.get_node(idx)) {
            None => tokens.push(0),
            Some(node) => {
                tokens.push(node.wire_value());
                if !node.is_back_reference() {
                    let (left, right) = node.children();
                    pending.push(right);
                    pending.push(left);
                }
            }
        }
    }
    tokens
}

/// One value per line, each line terminated by `\n`.
pub fn render(tokens: &[i64]) -> String {
    format!("{}\n", tokens.iter().join("\n"))
}

pub fn write_tree(tree: &TreeArena) -> String {
    render(&tree_tokens(tree))
}

pub fn write_dag(dag: &DagArena) -> String {
    render(&dag_tokens(dag))
}
