use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::catalog::Catalog;
use crate::domain::dag::{DagArena, DagNode};
use crate::domain::error::BackReferenceError;
use crate::domain::tree::{Side, Slot, TreeArena};

/// Counters collected while decompressing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompressionStats {
    pub dag_nodes: usize,
    /// Back-references expanded into copies
    pub back_references: usize,
    pub tree_nodes: usize,
}

/// Result of expanding one DAG.
#[derive(Debug)]
pub struct Decompression {
    pub tree: TreeArena,
    /// Materialized first occurrences, as indices into `tree`
    pub catalog: Catalog,
    pub stats: DecompressionStats,
}

/// Expands a DAG back into a tree.
///
/// Internal nodes are cataloged in pre-order as soon as they are
/// materialized, which reproduces the compressor's catalog order. Each
/// back-reference becomes an independent copy of the cataloged subtree;
/// copies themselves are not cataloged.
#[instrument(level = "debug", skip(dag))]
pub fn decompress(dag: &DagArena) -> Result<Decompression, BackReferenceError> {
    let mut tree = TreeArena::with_capacity(dag.len());
    let mut catalog = Catalog::new();
    let mut stats = DecompressionStats {
        dag_nodes: dag.iter().count(),
        ..Default::default()
    };

    // Catalog positions of the ancestors of the node being expanded.
    // Their subtrees are incomplete and must not be referenced.
    let mut open: Vec<usize> = Vec::new();
    let mut work: Vec<(Index, Slot, usize)> = dag.root().map(|r| (r, Slot::Root, 0)).into_iter().collect();

    while let Some((input, slot, depth)) = work.pop() {
        let Some(node) = dag.get_node(input).copied() else {
            continue;
        };
        open.truncate(depth);

        let out = match node {
            DagNode::BackReference { position } => {
                let source = catalog.get(position).ok_or(BackReferenceError::OutOfRange {
                    position,
                    cataloged: catalog.len(),
                })?;
                if open.binary_search(&position).is_ok() {
                    return Err(BackReferenceError::Unfinished { position });
                }
                trace!(position, "expanding back-reference");
                stats.back_references += 1;
                match copy_subtree(&mut tree, source) {
                    Some(copy) => copy,
                    None => continue,
                }
            }
            DagNode::Internal { value, left, right } => {
                let out = tree.insert_node(value);
                open.push(catalog.push(out));
                if let Some(right) = right {
                    work.push((right, Slot::Child(out, Side::Right), depth + 1));
                }
                if let Some(left) = left {
                    work.push((left, Slot::Child(out, Side::Left), depth + 1));
                }
                out
            }
        };
        tree.attach(slot, out);
    }

    stats.tree_nodes = tree.len();
    debug!(?stats, cataloged = catalog.len(), "decompression finished");
    Ok(Decompression {
        tree,
        catalog,
        stats,
    })
}

/// Fills a place with a fresh copy of the subtree at `source`.
///
/// Every node of the copy is a new allocation in `tree`; nothing is shared
/// with the source, so each copy can be changed or released on its own.
pub fn copy_subtree(tree: &mut TreeArena, source: Index) -> Option<Index> {
    let value = tree.get_node(source)?.value;
    let top = tree.insert_node(value);
    let mut work = vec![(source, top)];

    while let Some((from, to)) = work.pop() {
        let Some(node) = tree.get_node(from).copied() else {
            continue;
        };
        for (child, side) in [(node.left, Side::Left), (node.right, Side::Right)] {
            if let Some(child) = child {
                if let Some(child_value) = tree.get_node(child).map(|n| n.value) {
                    let copy = tree.insert_node(child_value);
                    tree.attach(Slot::Child(to, side), copy);
                    work.push((child, copy));
                }
            }
        }
    }
    Some(top)
}
