//! AVL-balanced ordered set.

use std::borrow::Borrow;
use std::fmt;

use crate::avl::iter::Keys;
use crate::avl::rotation::RebalanceStats;
use crate::avl::tree::AvlTree;

/// An ordered set of keys backed by an [`AvlTree`] with unit values.
///
/// # Examples
///
/// ```
/// use arboretum::avl::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert!(set.insert("pear"));
/// assert!(set.insert("apple"));
/// assert!(!set.insert("pear"));
///
/// assert!(set.contains("apple"));
/// assert_eq!(set.min(), Some(&"apple"));
/// assert_eq!(set.max(), Some(&"pear"));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct AvlSet<K> {
    tree: AvlTree<K, ()>,
}

impl<K> AvlSet<K> {
    /// Create an empty set.
    pub fn new() -> Self {
        AvlSet {
            tree: AvlTree::new(),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Nodes on the longest root-to-leaf path; 0 for an empty set.
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Rotation cases applied since the set was created.
    pub fn rebalance_stats(&self) -> RebalanceStats {
        self.tree.rebalance_stats()
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Keys in ascending order.
    pub fn iter(&self) -> Keys<'_, K, ()> {
        self.tree.keys()
    }

    /// The smallest key.
    pub fn min(&self) -> Option<&K> {
        self.tree.min().map(|(key, _)| key)
    }

    /// The largest key.
    pub fn max(&self) -> Option<&K> {
        self.tree.max().map(|(key, _)| key)
    }
}

impl<K: Ord> AvlSet<K> {
    /// Add `key`; returns `false` if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key, ()).is_none()
    }

    /// Remove `key`; returns `false` if it was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.remove(key).is_some()
    }

    /// Whether `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains_key(key)
    }
}

impl<K: Ord + fmt::Debug> AvlSet<K> {
    /// See [`AvlTree::check_invariants`].
    pub fn check_invariants(&self) {
        self.tree.check_invariants();
    }
}

impl<K> Default for AvlSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for AvlSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl<K: Ord> Extend<K> for AvlSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlSet<K> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_ascending_one_to_seven() {
        let set: AvlSet<i32> = (1..=7).collect();
        set.check_invariants();
        assert_eq!(set.height(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicate_insert_is_noop() {
        let mut set = AvlSet::new();
        assert!(set.insert(5));
        assert!(!set.insert(5));
        assert_eq!(set.len(), 1);
        assert_eq!(set.rebalance_stats().total(), 0);
    }

    #[test]
    fn test_remove() {
        let mut set: AvlSet<i32> = [10, 20, 30, 40, 50, 25].into_iter().collect();
        assert!(set.remove(&30));
        assert!(!set.remove(&30));
        assert!(!set.contains(&30));
        set.check_invariants();
        assert_eq!(set.min(), Some(&10));
        assert_eq!(set.max(), Some(&50));
        assert_eq!(format!("{set:?}"), "{10, 20, 25, 40, 50}");
    }

    #[test]
    fn test_string_keys() {
        let mut set = AvlSet::new();
        set.extend(["delta", "alpha", "charlie", "bravo"].map(String::from));
        assert!(set.contains("bravo"));
        let words: Vec<&str> = (&set).into_iter().map(String::as_str).collect();
        assert_eq!(words, vec!["alpha", "bravo", "charlie", "delta"]);
        set.clear();
        assert!(set.is_empty());
    }
}
