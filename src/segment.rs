//! Segment trees for range aggregates under point updates.
//!
//! The tree is stored as a flat array encoding a complete binary tree: the
//! root sits at slot 0 and the children of slot `i` at `2i + 1` and `2i + 2`.
//! Each slot caches the aggregate of a contiguous index range of the backing
//! array, so any range query touches O(log n) slots.

pub mod tree;

pub use tree::SegmentTree;
