//! Binary tree compression into DAGs of shared isomorphic subtrees.
//!
//! [`compress`] replaces every subtree that repeats an earlier one (in
//! pre-order) with a back-reference to it; [`decompress`] expands the
//! back-references into independent copies again.
//!
//! ```
//! use treedag::codec::{read_tree, write_dag};
//!
//! let tree = read_tree("5 3 0 0 3 0 0").unwrap();
//! let compressed = treedag::compress(&tree);
//! assert_eq!(write_dag(&compressed.dag), "5\n3\n0\n0\n-2\n");
//! ```

pub mod application;
pub mod cli;
pub mod codec;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    compress, compress_with, decompress, Catalog, DagArena, DagNode, MatchStrategy, TreeArena,
};
