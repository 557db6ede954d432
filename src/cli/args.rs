//! CLI argument definitions using clap

use clap::{ArgAction, Parser};

use crate::domain::MatchStrategy;

/// Compress a binary tree into a DAG of shared subtrees, or expand such a DAG back into a tree.
///
/// Reads stdin, writes stdout. One value per line, pre-order; 0 marks an absent child,
/// a negative value -(i+1) in a DAG refers back to the i-th distinct subtree.
#[derive(Parser, Debug)]
#[command(name = "treedag")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// `compress` (tree -> DAG) or `decompress` (DAG -> tree); anything else does nothing
    pub mode: Option<String>,

    /// Ignored
    #[arg(hide = true)]
    pub rest: Vec<String>,

    /// Log to stderr, repeat for more detail (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Print node and catalog counts to stderr
    #[arg(long)]
    pub stats: bool,

    /// Render input and result as indented trees on stderr
    #[arg(long)]
    pub show: bool,

    /// Subtree matching strategy for compression [linear, canonical]
    #[arg(long)]
    pub strategy: Option<MatchStrategy>,

    /// Print shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generator: Option<clap_complete::Shell>,
}

/// Direction of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

impl Mode {
    /// Only the first character is significant: `c...` compresses,
    /// `d...` decompresses, anything else selects nothing.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.chars().next() {
            Some('c') => Some(Mode::Compress),
            Some('d') => Some(Mode::Decompress),
            _ => None,
        }
    }
}

impl Cli {
    pub fn selected_mode(&self) -> Option<Mode> {
        self.mode.as_deref().and_then(Mode::from_arg)
    }
}
