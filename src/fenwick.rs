//! Fenwick trees (binary indexed trees) and the order-statistics helpers
//! built on top of them.
//!
//! A Fenwick tree answers prefix aggregates in O(log n) with exactly `n`
//! cached slots, half the memory of a segment tree, at the price of
//! requiring an invertible operator for arbitrary ranges. Sum and xor
//! qualify; min, max and gcd do not and are rejected at construction.

pub mod rank;
pub mod tree;

pub use rank::{FrequencyTable, RankSpace, count_smaller_after};
pub use tree::FenwickTree;
