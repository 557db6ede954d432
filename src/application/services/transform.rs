//! Compress and decompress service
//!
//! Reads the serialized form, runs the domain conversion, and writes the
//! serialized result. Nothing is written if any step fails.

use std::io::{Read, Write};

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::codec::{read_dag, read_tree, write_dag, write_tree};
use crate::domain::{
    compress_with, decompress, CompressionStats, DagArena, DecompressionStats, DomainResult,
    MatchStrategy, TreeArena,
};

/// Output from compressing a tree.
#[derive(Debug)]
pub struct CompressOutput {
    /// Parsed input tree
    pub input: TreeArena,
    pub dag: DagArena,
    pub stats: CompressionStats,
}

impl CompressOutput {
    /// Serialized DAG.
    pub fn text(&self) -> String {
        write_dag(&self.dag)
    }
}

/// Output from decompressing a DAG.
#[derive(Debug)]
pub struct DecompressOutput {
    /// Parsed input DAG
    pub input: DagArena,
    pub tree: TreeArena,
    pub stats: DecompressionStats,
}

impl DecompressOutput {
    /// Serialized tree.
    pub fn text(&self) -> String {
        write_tree(&self.tree)
    }
}

/// Service for converting between serialized trees and DAGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformService {
    strategy: MatchStrategy,
}

impl TransformService {
    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn compress_str(&self, input: &str) -> DomainResult<CompressOutput> {
        let tree = read_tree(input)?;
        debug!(nodes = tree.len(), depth = tree.depth(), strategy = %self.strategy, "tree parsed");
        let compression = compress_with(&tree, self.strategy);
        Ok(CompressOutput {
            input: tree,
            dag: compression.dag,
            stats: compression.stats,
        })
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn decompress_str(&self, input: &str) -> DomainResult<DecompressOutput> {
        let dag = read_dag(input)?;
        debug!(nodes = dag.len(), "DAG parsed");
        let decompression = decompress(&dag)?;
        Ok(DecompressOutput {
            input: dag,
            tree: decompression.tree,
            stats: decompression.stats,
        })
    }

    /// Reads a tree from `input` and writes its DAG to `output`.
    pub fn compress_stream<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> ApplicationResult<CompressOutput> {
        let text = read_all(input)?;
        let result = self.compress_str(&text)?;
        write_all(output, &result.text())?;
        Ok(result)
    }

    /// Reads a DAG from `input` and writes the expanded tree to `output`.
    pub fn decompress_stream<R: Read, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> ApplicationResult<DecompressOutput> {
        let text = read_all(input)?;
        let result = self.decompress_str(&text)?;
        write_all(output, &result.text())?;
        Ok(result)
    }
}

fn read_all<R: Read>(mut input: R) -> ApplicationResult<String> {
    let mut text = String::new();
    input.read_to_string(&mut text).with_io_context("read input")?;
    Ok(text)
}

fn write_all<W: Write>(mut output: W, text: &str) -> ApplicationResult<()> {
    output.write_all(text.as_bytes()).with_io_context("write output")?;
    output.flush().with_io_context("flush output")
}
