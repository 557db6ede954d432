//! Subtree matching strategies for the compressor.
//!
//! `Linear` is the reference algorithm: every candidate subtree is compared
//! with each catalog entry in turn, which is quadratic or worse in the size of
//! the tree. `Canonical` numbers isomorphism classes bottom-up in one pass and
//! resolves a match with a hash lookup. Both produce identical output, because
//! only the first member of an isomorphism class is ever cataloged.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::catalog::Catalog;
use crate::domain::tree::TreeArena;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    #[default]
    Linear,
    Canonical,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchStrategy::Linear => write!(f, "linear"),
            MatchStrategy::Canonical => write!(f, "canonical"),
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(MatchStrategy::Linear),
            "canonical" => Ok(MatchStrategy::Canonical),
            other => Err(format!(
                "unknown strategy '{}' (expected 'linear' or 'canonical')",
                other
            )),
        }
    }
}

/// Canonical id of every node in one tree.
#[derive(Debug, Default)]
pub struct CanonicalIds {
    ids: HashMap<Index, usize>,
    classes: usize,
}

impl CanonicalIds {
    /// Numbers the isomorphism classes of all subtrees of `tree`.
    #[instrument(level = "debug", skip(tree))]
    pub fn build(tree: &TreeArena) -> Self {
        let mut signatures: HashMap<(i64, Option<usize>, Option<usize>), usize> = HashMap::new();
        let mut ids = HashMap::with_capacity(tree.len());

        for (idx, node) in tree.iter_postorder() {
            // Children are numbered before their parent in post-order
            let left = node.left.and_then(|c| ids.get(&c).copied());
            let right = node.right.and_then(|c| ids.get(&c).copied());
            let next = signatures.len();
            let id = *signatures.entry((node.value, left, right)).or_insert(next);
            ids.insert(idx, id);
        }

        let classes = signatures.len();
        debug!(nodes = ids.len(), classes, "canonical ids built");
        Self { ids, classes }
    }

    pub fn id(&self, idx: Index) -> Option<usize> {
        self.ids.get(&idx).copied()
    }

    /// Number of distinct isomorphism classes.
    pub fn classes(&self) -> usize {
        self.classes
    }
}

/// Finds catalog matches for the compressor.
#[derive(Debug)]
pub(crate) enum Matcher {
    Linear,
    Canonical {
        ids: CanonicalIds,
        first_position: HashMap<usize, usize>,
    },
}

impl Matcher {
    pub(crate) fn new(strategy: MatchStrategy, tree: &TreeArena) -> Self {
        match strategy {
            MatchStrategy::Linear => Matcher::Linear,
            MatchStrategy::Canonical => Matcher::Canonical {
                ids: CanonicalIds::build(tree),
                first_position: HashMap::new(),
            },
        }
    }

    /// Catalog position of the first subtree isomorphic to `subtree`.
    pub(crate) fn find(&self, catalog: &Catalog, tree: &TreeArena, subtree: Index) -> Option<usize> {
        match self {
            Matcher::Linear => catalog.find_isomorphic(tree, subtree),
            Matcher::Canonical {
                ids,
                first_position,
            } => ids
                .id(subtree)
                .and_then(|id| first_position.get(&id).copied()),
        }
    }

    /// Records that `subtree` was cataloged at `position`.
    pub(crate) fn cataloged(&mut self, subtree: Index, position: usize) {
        if let Matcher::Canonical {
            ids,
            first_position,
        } = self
        {
            if let Some(id) = ids.id(subtree) {
                first_position.entry(id).or_insert(position);
            }
        }
    }
}
