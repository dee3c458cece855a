//! Hierarchical domain scoring.
//!
//! Domains are inserted into a trie keyed by reversed labels; a single walk
//! then pushes every node's score down to its subdomains and sums what the
//! leaves bank.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
