//! Scoring service
//!
//! Builds a fresh domain tree from the configured entries and reduces it.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::Settings;
use crate::domain::{
    leaf_contributions, reduce, DomainEntry, DomainTree, LeafContribution, ScoreOutcome,
    TreeBuilder,
};

/// Everything produced by one build-then-reduce run.
#[derive(Debug)]
pub struct ScoreReport {
    pub outcome: ScoreOutcome,
    /// Per-leaf breakdown, in label order
    pub leaves: Vec<LeafContribution>,
    /// The tree the outcome was computed from
    pub tree: DomainTree,
}

/// Service computing hierarchical domain scores.
pub struct ScoringService {
    settings: Arc<Settings>,
}

impl ScoringService {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Score the configured domains.
    pub fn run(&self) -> ScoreReport {
        self.score(&self.settings.domains)
    }

    /// Score an explicit entry list with the configured separator and traversal.
    ///
    /// Each call builds its own tree, so repeated runs never share state.
    #[instrument(level = "debug", skip(self, entries), fields(count = entries.len()))]
    pub fn score(&self, entries: &[DomainEntry]) -> ScoreReport {
        let tree = TreeBuilder::with_separator(self.settings.separator).build(entries);
        debug!("score: leaves={:?}", tree.leaf_nodes());

        let outcome = reduce(&tree, self.settings.traversal);
        let leaves = leaf_contributions(&tree);
        info!(
            "scored {} entries ({} traversal): {:?}",
            entries.len(),
            self.settings.traversal,
            outcome
        );

        ScoreReport {
            outcome,
            leaves,
            tree,
        }
    }
}
