use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::canonical::{MatchStrategy, Matcher};
use crate::domain::catalog::Catalog;
use crate::domain::dag::{DagArena, DagNode};
use crate::domain::tree::{Side, Slot, TreeArena};

/// Counters collected while compressing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Nodes in the input tree
    pub input_nodes: usize,
    /// Distinct subtrees recorded in the catalog
    pub cataloged: usize,
    /// Repeated subtrees replaced by back-references
    pub back_references: usize,
}

impl CompressionStats {
    /// Nodes in the emitted DAG.
    pub fn dag_nodes(&self) -> usize {
        self.cataloged + self.back_references
    }
}

/// Result of compressing one tree.
#[derive(Debug)]
pub struct Compression {
    pub dag: DagArena,
    /// First occurrences, as indices into the input tree
    pub catalog: Catalog,
    pub stats: CompressionStats,
}

/// Compresses with the reference linear catalog scan.
pub fn compress(tree: &TreeArena) -> Compression {
    Compressor::new(tree, MatchStrategy::Linear).run()
}

pub fn compress_with(tree: &TreeArena, strategy: MatchStrategy) -> Compression {
    Compressor::new(tree, strategy).run()
}

/// Turns a tree into a DAG, replacing each subtree isomorphic to an
/// earlier one (in pre-order) with a back-reference to that earlier one.
///
/// The input tree is only read. The catalog records input nodes, so
/// matching is always against original subtrees, never against output.
pub struct Compressor<'a> {
    tree: &'a TreeArena,
    catalog: Catalog,
    matcher: Matcher,
}

impl<'a> Compressor<'a> {
    pub fn new(tree: &'a TreeArena, strategy: MatchStrategy) -> Self {
        Self {
            tree,
            catalog: Catalog::new(),
            matcher: Matcher::new(strategy, tree),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn run(mut self) -> Compression {
        // The arena may hold nodes that are not linked below the root
        let input_nodes = self.tree.iter().count();
        let mut dag = DagArena::with_capacity(input_nodes);
        let mut stats = CompressionStats {
            input_nodes,
            ..Default::default()
        };

        let mut work: Vec<(Index, Slot)> = self.tree.root().map(|r| (r, Slot::Root)).into_iter().collect();

        while let Some((input, slot)) = work.pop() {
            let Some(node) = self.tree.get_node(input).copied() else {
                continue;
            };

            let out = match self.matcher.find(&self.catalog, self.tree, input) {
                Some(position) => {
                    trace!(value = node.value, position, "repeated subtree");
                    stats.back_references += 1;
                    dag.insert_node(DagNode::BackReference { position })
                }
                None => {
                    let position = self.catalog.push(input);
                    self.matcher.cataloged(input, position);
                    let out = dag.insert_node(DagNode::internal(node.value));
                    // Right is pushed first so the left subtree is cataloged first
                    if let Some(right) = node.right {
                        work.push((right, Slot::Child(out, Side::Right)));
                    }
                    if let Some(left) = node.left {
                        work.push((left, Slot::Child(out, Side::Left)));
                    }
                    out
                }
            };
            dag.attach(slot, out);
        }

        stats.cataloged = self.catalog.len();
        debug!(?stats, "compression finished");
        Compression {
            dag,
            catalog: self.catalog,
            stats,
        }
    }
}
