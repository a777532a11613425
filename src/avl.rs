//! Height-balanced binary search trees.
//!
//! Every node caches its height and the tree restores
//! `|height(left) - height(right)| <= 1` after each structural change with
//! one of four rotation cases (see [`Rotation`]). Height therefore stays
//! O(log n) even for sorted insertion orders, which would degrade a plain
//! binary search tree into a list.
//!
//! # Examples
//!
//! ```
//! use arboretum::avl::AvlSet;
//!
//! let mut set: AvlSet<i32> = (1..=7).collect();
//! assert!(set.height() <= 3);
//!
//! set.remove(&4);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7]);
//! ```

pub mod iter;
mod node;
pub mod rotation;
pub mod set;
pub mod tree;

pub use iter::{Iter, Keys};
pub use rotation::{RebalanceStats, Rotation};
pub use set::AvlSet;
pub use tree::AvlTree;
