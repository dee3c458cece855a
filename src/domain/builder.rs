//! Tree builder for turning ordered domain entries into a hierarchy.

use tracing::{debug, instrument};

use crate::domain::arena::{DomainTree, DEFAULT_SEPARATOR};
use crate::domain::entities::DomainEntry;

/// Constructs domain tries from ordered entries.
pub struct TreeBuilder {
    separator: char,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
        }
    }

    pub fn with_separator(separator: char) -> Self {
        Self { separator }
    }

    /// Build a fresh tree from all entries, in order.
    ///
    /// Order only matters for repeated domains: the later entry wins.
    #[instrument(level = "debug", skip(self, entries), fields(count = entries.len()))]
    pub fn build(&self, entries: &[DomainEntry]) -> DomainTree {
        let mut tree = DomainTree::with_separator(self.separator);
        for entry in entries {
            tree.insert(&entry.domain, entry.score);
        }
        debug!("built tree: nodes={}, depth={}", tree.node_count(), tree.depth());
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::default_entries;

    #[test]
    fn given_no_entries_when_building_then_tree_is_empty() {
        let tree = TreeBuilder::new().build(&[]);
        assert!(tree.is_empty());
    }

    #[test]
    fn given_default_entries_when_building_then_creates_six_nodes() {
        let tree = TreeBuilder::new().build(&default_entries());
        // root, com, google, maps, mail, yahoo
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn given_duplicate_domain_when_building_then_last_entry_wins() {
        let entries = vec![
            DomainEntry::new("example.com", 7),
            DomainEntry::new("example.com", 2),
        ];
        let tree = TreeBuilder::new().build(&entries);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.find("example.com").unwrap().score, 2);
    }
}
