//! # Arboretum
//!
//! In-memory index structures for Rust.
//!
//! ## Features
//!
//! - Prefix trie with lazy, bounded autocomplete and wildcard matching
//! - Segment tree over any associative operator
//! - Fenwick tree for invertible operators, with order-statistics helpers
//! - AVL-balanced ordered map and set
//! - Pluggable aggregate operators selectable at runtime

pub mod aggregate;
pub mod avl;
pub mod error;
pub mod fenwick;
pub mod segment;
pub mod trie;

pub mod prelude {
    pub use crate::aggregate::{Aggregate, AggregateKind, FnAggregate, Gcd, Max, Min, Sum, Xor};
    pub use crate::avl::{AvlSet, AvlTree};
    pub use crate::error::{ArboretumError, Result};
    pub use crate::fenwick::{FenwickTree, FrequencyTable, RankSpace};
    pub use crate::segment::SegmentTree;
    pub use crate::trie::{Completion, TrieConfig, TrieIndex, WeightPolicy};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
