//! Domain entities: core data structures

use serde::{Deserialize, Serialize};

/// A domain string with the score attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEntry {
    pub domain: String,
    pub score: i64,
}

impl DomainEntry {
    pub fn new(domain: impl Into<String>, score: i64) -> Self {
        Self {
            domain: domain.into(),
            score,
        }
    }
}

/// Built-in input set used when no configuration supplies domains.
pub fn default_entries() -> Vec<DomainEntry> {
    vec![
        DomainEntry::new("google.com", 10),
        DomainEntry::new("maps.google.com", 5),
        DomainEntry::new("mail.google.com", 10),
        DomainEntry::new("yahoo.com", 1),
    ]
}

/// Per-leaf amount banked by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafContribution {
    /// Full domain name of the leaf
    pub domain: String,
    /// Own score plus all ancestor scores
    pub contribution: i64,
}
