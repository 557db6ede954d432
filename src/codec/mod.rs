//! Text wire format: one integer per line, pre-order.
//!
//! Tree form: a value, then its left and right subtrees; `0` is an absent
//! subtree. DAG form: the same, except that a negative value `-(i + 1)` is a
//! back-reference to catalog position `i` and has no children.

pub mod reader;
pub mod writer;

pub use reader::{read_dag, read_tree, TokenStream};
pub use writer::{dag_tokens, render, tree_tokens, write_dag, write_tree};
