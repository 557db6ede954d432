//! Reads the pre-order integer format into trees and DAGs.

use std::str::{Lines, SplitWhitespace};

use tracing::{instrument, warn};

use crate::domain::dag::{decode_back_reference, DagArena, DagNode};
use crate::domain::error::{DomainResult, ParseError};
use crate::domain::tree::{Side, Slot, TreeArena};

/// Whitespace-separated integer tokens with line tracking.
pub struct TokenStream<'a> {
    lines: Lines<'a>,
    current: SplitWhitespace<'a>,
    line: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            current: "".split_whitespace(),
            line: 0,
        }
    }

    /// Line number (1-based) of the last token returned.
    pub fn line(&self) -> usize {
        self.line
    }

    fn next_token(&mut self) -> Option<&'a str> {
        loop {
            if let Some(token) = self.current.next() {
                return Some(token);
            }
            let line = self.lines.next()?;
            self.line += 1;
            self.current = line.split_whitespace();
        }
    }

    pub fn next_value(&mut self, expected: &'static str) -> Result<i64, ParseError> {
        let token = self
            .next_token()
            .ok_or(ParseError::UnexpectedEof { expected })?;
        token.parse::<i64>().map_err(|_| ParseError::InvalidToken {
            line: self.line,
            token: token.to_string(),
        })
    }

    /// Consumes and counts whatever is left.
    pub fn count_remaining(&mut self) -> usize {
        std::iter::from_fn(|| self.next_token()).count()
    }
}

fn warn_trailing(tokens: &mut TokenStream<'_>) {
    let trailing = tokens.count_remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the end of the structure");
    }
}

/// Parses a tree: each value is followed by its left and right subtrees,
/// `0` marks an absent child.
#[instrument(level = "debug", skip(input))]
pub fn read_tree(input: &str) -> DomainResult<TreeArena> {
    let mut tokens = TokenStream::new(input);
    let mut tree = TreeArena::new();
    let mut pending = vec![Slot::Root];

    while let Some(slot) = pending.pop() {
        let value = tokens.next_value("tree node value")?;
        if value == 0 {
            continue;
        }
        if value < 0 {
            return Err(ParseError::NegativeTreeValue {
                line: tokens.line(),
                value,
            }
            .into());
        }
        let idx = tree.insert_node(value);
        tree.attach(slot, idx);
        pending.push(Slot::Child(idx, Side::Right));
        pending.push(Slot::Child(idx, Side::Left));
    }

    warn_trailing(&mut tokens);
    Ok(tree)
}

/// Parses a DAG: like a tree, except that a negative value is a
/// back-reference leaf with no children following it.
#[instrument(level = "debug", skip(input))]
pub fn read_dag(input: &str) -> DomainResult<DagArena> {
    let mut tokens = TokenStream::new(input);
    let mut dag = DagArena::new();
    let mut pending = vec![Slot::Root];

    while let Some(slot) = pending.pop() {
        let value = tokens.next_value("DAG node value")?;
        let idx = match value {
            0 => continue,
            v if v < 0 => dag.insert_node(DagNode::BackReference {
                position: decode_back_reference(v)?,
            }),
            v => {
                let idx = dag.insert_node(DagNode::internal(v));
                pending.push(Slot::Child(idx, Side::Right));
                pending.push(Slot::Child(idx, Side::Left));
                idx
            }
        };
        dag.attach(slot, idx);
    }

    warn_trailing(&mut tokens);
    Ok(dag)
}
