//! Domain layer: trees, DAGs, and the conversions between them
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod canonical;
pub mod catalog;
pub mod compress;
pub mod dag;
pub mod decompress;
pub mod error;
pub mod isomorphism;
pub mod tree;

pub use canonical::{CanonicalIds, MatchStrategy};
pub use catalog::Catalog;
pub use compress::{compress, compress_with, Compression, CompressionStats, Compressor};
pub use dag::{decode_back_reference, encode_back_reference, DagArena, DagNode};
pub use decompress::{copy_subtree, decompress, Decompression, DecompressionStats};
pub use error::{BackReferenceError, DomainError, DomainResult, ParseError};
pub use isomorphism::{is_isomorphic, isomorphic_between};
pub use tree::{Side, Slot, TreeArena, TreeNode};
