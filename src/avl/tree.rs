//! AVL-balanced ordered map.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::avl::iter::{Iter, Keys};
use crate::avl::node::{AvlNode, Link, height};
use crate::avl::rotation::{RebalanceStats, rebalance};

/// An ordered map kept height-balanced by AVL rotations.
///
/// `get`, `insert` and `remove` are O(log n) in the worst case. Insertion
/// applies at most one rotation case; removal may apply one at every level
/// on the way back to the root.
///
/// # Examples
///
/// ```
/// use arboretum::avl::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30, 40, 50, 25] {
///     tree.insert(key, key * 2);
/// }
/// tree.check_invariants();
/// assert!(tree.height() <= 3);
/// assert_eq!(tree.get(&25), Some(&50));
/// assert_eq!(tree.remove(&30), Some(60));
/// assert!(!tree.contains_key(&30));
/// ```
#[derive(Clone)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    len: usize,
    stats: RebalanceStats,
}

impl<K, V> AvlTree<K, V> {
    /// Create an empty tree.
    pub fn new() -> Self {
        AvlTree {
            root: None,
            len: 0,
            stats: RebalanceStats::default(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Nodes on the longest root-to-leaf path; 0 for an empty tree.
    pub fn height(&self) -> usize {
        height(&self.root) as usize
    }

    /// Rotation cases applied since the tree was created.
    pub fn rebalance_stats(&self) -> RebalanceStats {
        self.stats
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// The entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// The entry with the largest key.
    pub fn max(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    /// Insert `key` with `value`, rebalancing bottom-up along the insertion
    /// path.
    ///
    /// If `key` was present its value is replaced and the old value returned;
    /// the structure does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, replaced) = Self::insert_at(self.root.take(), key, value, &mut self.stats);
        self.root = Some(root);
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    fn insert_at(
        link: Link<K, V>,
        key: K,
        value: V,
        stats: &mut RebalanceStats,
    ) -> (Box<AvlNode<K, V>>, Option<V>) {
        let Some(mut node) = link else {
            return (AvlNode::leaf(key, value), None);
        };

        match key.cmp(&node.key) {
            Ordering::Less => {
                let (child, replaced) = Self::insert_at(node.left.take(), key, value, stats);
                node.left = Some(child);
                if replaced.is_some() {
                    return (node, replaced);
                }
            }
            Ordering::Greater => {
                let (child, replaced) = Self::insert_at(node.right.take(), key, value, stats);
                node.right = Some(child);
                if replaced.is_some() {
                    return (node, replaced);
                }
            }
            Ordering::Equal => {
                let old = mem::replace(&mut node.value, value);
                return (node, Some(old));
            }
        }

        let (node, rotation) = rebalance(node);
        stats.record(rotation);
        (node, None)
    }

    /// Remove `key`, returning its value if it was present.
    ///
    /// A node with two children takes over its in-order successor's entry,
    /// and the successor is unlinked from the right subtree. Every ancestor
    /// of the unlinked node is then rebalanced.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (root, removed) = Self::remove_at(self.root.take(), key, &mut self.stats);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn remove_at<Q>(link: Link<K, V>, key: &Q, stats: &mut RebalanceStats) -> (Link<K, V>, Option<V>)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut node) = link else {
            return (None, None);
        };

        let removed = match key.cmp(node.key.borrow()) {
            Ordering::Less => {
                let (child, removed) = Self::remove_at(node.left.take(), key, stats);
                node.left = child;
                removed
            }
            Ordering::Greater => {
                let (child, removed) = Self::remove_at(node.right.take(), key, stats);
                node.right = child;
                removed
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    let AvlNode { value, .. } = *node;
                    return (None, Some(value));
                }
                (Some(child), None) | (None, Some(child)) => {
                    let AvlNode { value, .. } = *node;
                    return (Some(child), Some(value));
                }
                (Some(left), Some(right)) => {
                    let (rest, successor) = Self::take_min(right, stats);
                    let AvlNode {
                        key: next_key,
                        value: next_value,
                        ..
                    } = *successor;
                    node.left = Some(left);
                    node.right = rest;
                    node.key = next_key;
                    Some(mem::replace(&mut node.value, next_value))
                }
            },
        };

        if removed.is_none() {
            return (Some(node), None);
        }

        let (node, rotation) = rebalance(node);
        stats.record(rotation);
        (Some(node), removed)
    }

    /// Unlink the minimum node of the subtree, rebalancing on the way up.
    fn take_min(
        mut node: Box<AvlNode<K, V>>,
        stats: &mut RebalanceStats,
    ) -> (Link<K, V>, Box<AvlNode<K, V>>) {
        match node.left.take() {
            None => {
                let rest = node.right.take();
                (rest, node)
            }
            Some(left) => {
                let (rest, min) = Self::take_min(left, stats);
                node.left = rest;
                let (node, rotation) = rebalance(node);
                stats.record(rotation);
                (Some(node), min)
            }
        }
    }

    /// The value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &self.root;
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = &node.left,
                Ordering::Greater => link = &node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Greater => link = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Whether `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }
}

impl<K: Ord + fmt::Debug, V> AvlTree<K, V> {
    /// Verify ordering, cached heights, the balance bound at every node and
    /// the cached length.
    ///
    /// # Panics
    ///
    /// Panics on the first violation found.
    pub fn check_invariants(&self) {
        let (_, count) = Self::check_node(&self.root);
        assert_eq!(
            count, self.len,
            "AVL invariant violated: {count} nodes but len is {}",
            self.len
        );

        let mut previous: Option<&K> = None;
        for key in self.keys() {
            if let Some(previous) = previous {
                assert!(
                    previous < key,
                    "AVL ordering violated: {previous:?} is not below {key:?}"
                );
            }
            previous = Some(key);
        }
    }

    /// Returns `(height, node count)` of the subtree.
    fn check_node(link: &Link<K, V>) -> (u32, usize) {
        let Some(node) = link else {
            return (0, 0);
        };
        let (left_height, left_count) = Self::check_node(&node.left);
        let (right_height, right_count) = Self::check_node(&node.right);

        assert_eq!(
            node.height,
            1 + left_height.max(right_height),
            "AVL invariant violated: stale height at key {:?}",
            node.key
        );
        let balance = i64::from(left_height) - i64::from(right_height);
        assert!(
            balance.abs() <= 1,
            "AVL balance invariant violated at key {:?}: balance factor {balance}",
            node.key
        );

        (node.height, left_count + right_count + 1)
    }
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for AvlTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for AvlTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
