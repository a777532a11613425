//! Prefix trees for exact, prefix and wildcard lookups over strings.
//!
//! A [`TrieIndex`] stores each sequence as one root-to-node path, so every
//! sequence sharing a prefix shares that prefix's nodes. Child storage is a
//! construction-time strategy (see [`ChildStorage`]): a hash map per node
//! for open alphabets or a fixed slot array for small known ones.
//!
//! # Examples
//!
//! ```
//! use arboretum::trie::TrieIndex;
//!
//! let mut trie = TrieIndex::new();
//! for word in ["apple", "app", "application"] {
//!     trie.insert(word).unwrap();
//! }
//!
//! assert!(trie.contains("app"));
//! assert!(!trie.contains("appl"));
//! assert!(trie.has_prefix("appl"));
//! ```

mod children;
pub mod config;
pub mod index;
pub mod iter;
mod node;

pub use config::{Alphabet, ChildStorage, TrieConfig, WeightPolicy};
pub use index::TrieIndex;
pub use iter::{Completion, Completions};
