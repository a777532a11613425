//! Array-backed segment tree.

use std::fmt;

use log::debug;

use crate::aggregate::{Aggregate, AggregateKind, Bounded, Integral, Sum, Summable};
use crate::error::{ArboretumError, Result, check_range};

#[inline]
fn left_child(node: usize) -> usize {
    2 * node + 1
}

#[inline]
fn right_child(node: usize) -> usize {
    2 * node + 2
}

#[inline]
fn midpoint(start: usize, end: usize) -> usize {
    start + (end - start) / 2
}

/// A segment tree over a fixed-length array.
///
/// Built once in O(n); `update` and `query` are O(log n). The logical length
/// never changes after construction.
///
/// # Examples
///
/// ```
/// use arboretum::aggregate::Sum;
/// use arboretum::segment::SegmentTree;
///
/// let mut tree = SegmentTree::build(&[1, 3, 5, 7, 9, 11], Sum);
/// assert_eq!(tree.query(1, 3).unwrap(), 15);
///
/// tree.update(1, 10).unwrap();
/// assert_eq!(tree.query(1, 3).unwrap(), 22);
/// ```
#[derive(Clone)]
pub struct SegmentTree<T, A = Sum> {
    /// Cached aggregates, `4 * len` slots.
    tree: Vec<T>,
    /// Length of the backing array.
    len: usize,
    /// The combine operator.
    op: A,
}

impl<T, A> SegmentTree<T, A> {
    /// Number of elements in the backing array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the backing array is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The operator this tree aggregates with.
    pub fn operator(&self) -> &A {
        &self.op
    }
}

impl<T: Clone, A: Aggregate<T>> SegmentTree<T, A> {
    /// Build a tree over `values` in O(n).
    pub fn build(values: &[T], op: A) -> Self {
        let len = values.len();
        let mut tree = vec![op.identity(); 4 * len];
        if len > 0 {
            Self::build_node(&op, &mut tree, values, 0, 0, len - 1);
        }

        debug!("built segment tree: len={} op={}", len, op.name());

        SegmentTree { tree, len, op }
    }

    fn build_node(op: &A, tree: &mut [T], values: &[T], node: usize, start: usize, end: usize) {
        if start == end {
            tree[node] = values[start].clone();
            return;
        }

        let mid = midpoint(start, end);
        let (left, right) = (left_child(node), right_child(node));
        Self::build_node(op, tree, values, left, start, mid);
        Self::build_node(op, tree, values, right, mid + 1, end);
        tree[node] = op.combine(&tree[left], &tree[right]);
    }

    /// Replace the element at `index` and refresh every ancestor aggregate.
    pub fn update(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len {
            return Err(ArboretumError::invalid_index(index, self.len));
        }

        Self::update_node(&self.op, &mut self.tree, 0, 0, self.len - 1, index, value);
        Ok(())
    }

    fn update_node(
        op: &A,
        tree: &mut [T],
        node: usize,
        start: usize,
        end: usize,
        index: usize,
        value: T,
    ) {
        if start == end {
            tree[node] = value;
            return;
        }

        let mid = midpoint(start, end);
        let (left, right) = (left_child(node), right_child(node));
        if index <= mid {
            Self::update_node(op, tree, left, start, mid, index, value);
        } else {
            Self::update_node(op, tree, right, mid + 1, end, index, value);
        }
        tree[node] = op.combine(&tree[left], &tree[right]);
    }

    /// Aggregate of the inclusive range `[left, right]`.
    ///
    /// Fails with [`ArboretumError::InvalidRange`] unless
    /// `left <= right < len`.
    pub fn query(&self, left: usize, right: usize) -> Result<T> {
        check_range(left, right, self.len)?;
        Ok(self.query_node(0, 0, self.len - 1, left, right))
    }

    fn query_node(&self, node: usize, start: usize, end: usize, left: usize, right: usize) -> T {
        // No overlap.
        if right < start || end < left {
            return self.op.identity();
        }
        // Total overlap.
        if left <= start && end <= right {
            return self.tree[node].clone();
        }

        let mid = midpoint(start, end);
        let lhs = self.query_node(left_child(node), start, mid, left, right);
        let rhs = self.query_node(right_child(node), mid + 1, end, left, right);
        self.op.combine(&lhs, &rhs)
    }

    /// The current element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(ArboretumError::invalid_index(index, self.len));
        }

        let (mut node, mut start, mut end) = (0, 0, self.len - 1);
        while start != end {
            let mid = midpoint(start, end);
            if index <= mid {
                node = left_child(node);
                end = mid;
            } else {
                node = right_child(node);
                start = mid + 1;
            }
        }
        Ok(self.tree[node].clone())
    }

    /// The backing array, read back from the leaves.
    pub fn values(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        if self.len > 0 {
            self.collect_leaves(0, 0, self.len - 1, &mut out);
        }
        out
    }

    fn collect_leaves(&self, node: usize, start: usize, end: usize, out: &mut Vec<T>) {
        if start == end {
            out.push(self.tree[node].clone());
            return;
        }
        let mid = midpoint(start, end);
        self.collect_leaves(left_child(node), start, mid, out);
        self.collect_leaves(right_child(node), mid + 1, end, out);
    }
}

impl<T, A> SegmentTree<T, A>
where
    T: Clone + PartialEq + fmt::Debug,
    A: Aggregate<T>,
{
    /// Verify that every internal slot equals the combination of its
    /// children.
    ///
    /// # Panics
    ///
    /// Panics on the first slot whose cached aggregate is stale; that can
    /// only happen through a bug in this module.
    pub fn check_invariants(&self) {
        if self.len > 0 {
            self.check_node(0, 0, self.len - 1);
        }
    }

    fn check_node(&self, node: usize, start: usize, end: usize) {
        if start == end {
            return;
        }
        let mid = midpoint(start, end);
        let (left, right) = (left_child(node), right_child(node));
        self.check_node(left, start, mid);
        self.check_node(right, mid + 1, end);

        let expected = self.op.combine(&self.tree[left], &self.tree[right]);
        assert_eq!(
            self.tree[node], expected,
            "segment aggregate invariant violated at slot {node} covering [{start}, {end}]"
        );
    }
}

impl<T> SegmentTree<T, Box<dyn Aggregate<T>>>
where
    T: Summable + Bounded + Integral + 'static,
{
    /// Build a tree whose operator is chosen at runtime.
    ///
    /// ```
    /// use arboretum::aggregate::AggregateKind;
    /// use arboretum::segment::SegmentTree;
    ///
    /// let tree = SegmentTree::from_kind(&[5i64, 2, 8, 1], AggregateKind::Min);
    /// assert_eq!(tree.query(0, 2).unwrap(), 2);
    /// ```
    pub fn from_kind(values: &[T], kind: AggregateKind) -> Self {
        SegmentTree::build(values, kind.operator())
    }
}

impl<T: Clone + fmt::Debug, A: Aggregate<T>> fmt::Debug for SegmentTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentTree")
            .field("op", &self.op.name())
            .field("values", &self.values())
            .finish()
    }
}
