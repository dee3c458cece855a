//! Score reduction over a domain tree.
//!
//! Every node passes its own score down to its descendants. Only leaves bank a
//! value (`own + inherited`); an internal node contributes solely through its
//! subtree, never as a standalone total.
//!
//! Sums wrap on `i64` overflow, so a reduction never fails.

use std::fmt;
use std::str::FromStr;

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::DomainTree;
use crate::domain::entities::LeafContribution;

/// Walk strategy for the reducer. Both produce identical totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    #[default]
    Recursive,
    Iterative,
}

impl FromStr for Traversal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recursive" => Ok(Self::Recursive),
            "iterative" => Ok(Self::Iterative),
            other => Err(format!(
                "unknown traversal '{other}', expected 'recursive' or 'iterative'"
            )),
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Iterative => write!(f, "iterative"),
        }
    }
}

/// Result of reducing a whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// Root has no children
    NoDomains,
    Total(i64),
}

impl ScoreOutcome {
    pub fn value(&self) -> i64 {
        match self {
            Self::NoDomains => 0,
            Self::Total(total) => *total,
        }
    }
}

/// Total contributed by `idx` and its subtree, given the summed scores of its
/// strict ancestors.
pub fn compute_score(tree: &DomainTree, idx: Index, inherited: i64) -> i64 {
    let Some(node) = tree.get_node(idx) else {
        return 0;
    };

    if node.is_leaf() {
        return node.score.wrapping_add(inherited);
    }

    let passed_down = inherited.wrapping_add(node.score);
    node.children
        .values()
        .map(|&child| compute_score(tree, child, passed_down))
        .fold(0, i64::wrapping_add)
}

/// Explicit-stack variant of [`compute_score`].
///
/// Each stack entry carries the accumulated ancestor score for its node.
pub fn compute_score_iterative(tree: &DomainTree, idx: Index, inherited: i64) -> i64 {
    let mut total: i64 = 0;
    let mut stack = vec![(idx, inherited)];

    while let Some((current, inherited)) = stack.pop() {
        let Some(node) = tree.get_node(current) else {
            continue;
        };
        if node.is_leaf() {
            total = total.wrapping_add(node.score.wrapping_add(inherited));
        } else {
            for &child in node.children.values() {
                stack.push((child, inherited.wrapping_add(node.score)));
            }
        }
    }

    total
}

/// Reduces the whole tree from its root.
#[instrument(level = "debug", skip(tree))]
pub fn reduce(tree: &DomainTree, traversal: Traversal) -> ScoreOutcome {
    if tree.is_empty() {
        debug!("no domains present");
        return ScoreOutcome::NoDomains;
    }

    let total = match traversal {
        Traversal::Recursive => compute_score(tree, tree.root(), 0),
        Traversal::Iterative => compute_score_iterative(tree, tree.root(), 0),
    };
    debug!("total score: {}", total);
    ScoreOutcome::Total(total)
}

/// Amount banked at every leaf, in label order. Sums to the reduced total.
#[instrument(level = "debug", skip(tree))]
pub fn leaf_contributions(tree: &DomainTree) -> Vec<LeafContribution> {
    let mut leaves = Vec::new();
    if !tree.is_empty() {
        collect_contributions(tree, tree.root(), 0, &mut leaves);
    }
    leaves
}

fn collect_contributions(
    tree: &DomainTree,
    idx: Index,
    inherited: i64,
    leaves: &mut Vec<LeafContribution>,
) {
    if let Some(node) = tree.get_node(idx) {
        if node.is_leaf() {
            leaves.push(LeafContribution {
                domain: tree.full_domain(idx),
                contribution: node.score.wrapping_add(inherited),
            });
        } else {
            for &child in node.children.values() {
                collect_contributions(tree, child, inherited.wrapping_add(node.score), leaves);
            }
        }
    }
}
