//! Domain layer: the domain trie and its score reduction
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod score;

pub use arena::{DomainNode, DomainTree, DEFAULT_SEPARATOR};
pub use builder::TreeBuilder;
pub use entities::*;
pub use score::{
    compute_score, compute_score_iterative, leaf_contributions, reduce, ScoreOutcome, Traversal,
};
