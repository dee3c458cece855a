//! Arena-based domain trie.
//!
//! Nodes are keyed by domain label and stored most-general first, so
//! `maps.google.com` lives at `com -> google -> maps` below the root.

use std::collections::BTreeMap;
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use termtree::Tree;
use tracing::{instrument, trace};

/// Default label separator for domain strings.
pub const DEFAULT_SEPARATOR: char = '.';

/// One domain label at one level of the hierarchy.
#[derive(Debug)]
pub struct DomainNode {
    /// Label of this level, empty for the root
    pub label: String,
    /// Own score, 0 unless a domain terminates exactly here
    pub score: i64,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Children keyed by label
    pub children: BTreeMap<String, Index>,
}

impl DomainNode {
    fn new(label: &str, parent: Option<Index>) -> Self {
        Self {
            label: label.to_string(),
            score: 0,
            parent,
            children: BTreeMap::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl fmt::Display for DomainNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.score)
    }
}

/// Domain hierarchy owned by a single arena.
///
/// The root always exists, so an "empty" tree is one whose root has no children.
#[derive(Debug)]
pub struct DomainTree {
    arena: Arena<DomainNode>,
    root: Index,
    separator: char,
}

impl Default for DomainTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainTree {
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    pub fn with_separator(separator: char) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(DomainNode::new("", None));
        Self {
            arena,
            root,
            separator,
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Inserts `domain` top-level label first and sets the final node's score.
    ///
    /// Missing intermediate nodes are created with score 0. Inserting the same
    /// domain again overwrites its score. Empty segments are not rejected; they
    /// become nodes with empty labels.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, domain: &str, score: i64) {
        let mut current = self.root;

        for label in domain.split(self.separator).rev() {
            current = match self.arena[current].children.get(label) {
                Some(&child) => child,
                None => {
                    let child = self.arena.insert(DomainNode::new(label, Some(current)));
                    self.arena[current].children.insert(label.to_string(), child);
                    trace!("created node {:?} under {:?}", label, current);
                    child
                }
            };
        }

        self.arena[current].score = score;
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn get_node(&self, idx: Index) -> Option<&DomainNode> {
        self.arena.get(idx)
    }

    /// True when no domain has been inserted.
    ///
    /// The root always exists, so an empty tree still has a `node_count` of 1.
    pub fn is_empty(&self) -> bool {
        self.arena[self.root].is_leaf()
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Looks up the node for a full domain string.
    pub fn find(&self, domain: &str) -> Option<&DomainNode> {
        let mut current = self.root;
        for label in domain.split(self.separator).rev() {
            current = *self.arena.get(current)?.children.get(label)?;
        }
        self.arena.get(current)
    }

    /// Reconstructs the full domain name of a node, most specific label first.
    pub fn full_domain(&self, idx: Index) -> String {
        let mut labels = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            let Some(node) = self.arena.get(node_idx) else {
                break;
            };
            if node.parent.is_some() {
                labels.push(node.label.as_str());
            }
            current = node.parent;
        }
        labels.iter().join(&self.separator.to_string())
    }

    /// Longest root-to-leaf path measured in labels.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root) - 1
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .values()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects the full domain names of all leaves.
    ///
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(idx, node)| node.is_leaf() && *idx != self.root)
            .map(|(idx, _)| self.full_domain(idx))
            .collect()
    }

    /// Pre-order iterator starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Renders the hierarchy as a `termtree` with `label (score)` nodes.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &DomainTree, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = tree.get_node(node_idx) {
                for &child_idx in node.children.values() {
                    if let Some(child) = tree.get_node(child_idx) {
                        let mut child_tree = Tree::new(child.to_string());
                        build_tree(tree, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }
        }

        let mut root = Tree::new(format!("{}", self.separator));
        build_tree(self, self.root, &mut root);
        root
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DomainTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DomainTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a DomainNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // reverse so children come out in label order
                self.stack.extend(node.children.values().rev().copied());
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_new_tree_when_created_then_only_root_exists() {
        let tree = DomainTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
        let root = tree.get_node(tree.root()).unwrap();
        assert_eq!(root.label, "");
        assert_eq!(root.score, 0);
        assert!(root.parent.is_none());
    }

    #[test]
    fn given_domain_when_inserted_then_labels_are_reversed() {
        let mut tree = DomainTree::new();
        tree.insert("maps.google.com", 5);

        let root = tree.get_node(tree.root()).unwrap();
        assert_eq!(root.children.keys().collect::<Vec<_>>(), vec!["com"]);

        let com = tree.get_node(root.children["com"]).unwrap();
        assert_eq!(com.score, 0);
        let google = tree.get_node(com.children["google"]).unwrap();
        assert_eq!(google.score, 0);
        let maps = tree.get_node(google.children["maps"]).unwrap();
        assert_eq!(maps.score, 5);
        assert!(maps.is_leaf());
    }

    #[test]
    fn given_shared_suffix_when_inserted_then_reuses_intermediate_nodes() {
        let mut tree = DomainTree::new();
        tree.insert("maps.google.com", 5);
        tree.insert("mail.google.com", 10);

        // root, com, google, maps, mail
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn given_intermediate_domain_when_inserted_later_then_sets_score_without_new_nodes() {
        let mut tree = DomainTree::new();
        tree.insert("maps.google.com", 5);
        tree.insert("google.com", 10);

        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.find("google.com").unwrap().score, 10);
        assert_eq!(tree.find("maps.google.com").unwrap().score, 5);
    }

    #[test]
    fn given_malformed_domain_when_inserted_then_creates_empty_label() {
        let mut tree = DomainTree::new();
        tree.insert("google..com", 3);

        let com = tree.find("com").unwrap();
        assert!(com.children.contains_key(""));
        assert_eq!(tree.find("google..com").unwrap().score, 3);
    }

    #[test]
    fn given_custom_separator_when_inserted_then_splits_on_it() {
        let mut tree = DomainTree::with_separator('/');
        tree.insert("maps/google/com", 5);

        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaf_nodes(), vec!["maps/google/com".to_string()]);
    }

    #[test]
    fn given_tree_when_getting_depth_then_counts_labels() {
        let mut tree = DomainTree::new();
        assert_eq!(tree.depth(), 0);
        tree.insert("yahoo.com", 1);
        tree.insert("a.b.example.org", 1);
        assert_eq!(tree.depth(), 4);
    }

    #[test]
    fn given_tree_when_getting_leaves_then_returns_full_domains() {
        let mut tree = DomainTree::new();
        tree.insert("google.com", 10);
        tree.insert("maps.google.com", 5);
        tree.insert("yahoo.com", 1);

        let mut leaves = tree.leaf_nodes();
        leaves.sort();
        assert_eq!(leaves, vec!["maps.google.com", "yahoo.com"]);
    }

    #[test]
    fn given_empty_tree_when_getting_leaves_then_returns_nothing() {
        let tree = DomainTree::new();
        assert!(tree.leaf_nodes().is_empty());
    }

    #[test]
    fn given_tree_when_rendered_then_shows_labels_and_scores() {
        let mut tree = DomainTree::new();
        tree.insert("google.com", 10);

        let rendered = tree.to_tree_string().to_string();
        assert!(rendered.contains("com (0)"));
        assert!(rendered.contains("google (10)"));
    }
}
