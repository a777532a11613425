//! Generic Fenwick tree over an invertible operator.

use std::fmt;

use log::debug;

use crate::aggregate::{Aggregate, Sum};
use crate::error::{ArboretumError, Result, check_range};

/// Lowest set bit of `i` (i.e., `i & -i`).
#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// A Fenwick tree supporting point updates and prefix/range aggregates in
/// O(log n).
///
/// Slot `i` (1-based) caches the aggregate of the `lowbit(i)` elements
/// ending at element `i - 1`. The operator must be commutative and
/// invertible.
///
/// # Examples
///
/// ```
/// use arboretum::aggregate::Sum;
/// use arboretum::fenwick::FenwickTree;
///
/// let mut tree = FenwickTree::from_slice(&[3, 2, -1, 6, 5, 4, -3, 3], Sum).unwrap();
/// assert_eq!(tree.prefix_query(2).unwrap(), 4);
/// assert_eq!(tree.range_query(2, 5).unwrap(), 14);
///
/// tree.update(2, 5).unwrap();
/// assert_eq!(tree.range_query(2, 5).unwrap(), 19);
/// ```
#[derive(Clone)]
pub struct FenwickTree<T, A = Sum> {
    /// 1-indexed slots; slot 0 holds the identity and is never read.
    tree: Vec<T>,
    op: A,
}

impl<T, A> FenwickTree<T, A> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The operator this tree aggregates with.
    pub fn operator(&self) -> &A {
        &self.op
    }
}

impl<T: Clone, A: Aggregate<T>> FenwickTree<T, A> {
    /// Create a tree of `len` elements, all equal to the identity.
    ///
    /// Fails with [`ArboretumError::UnsupportedOperation`] when `op` has no
    /// inverse.
    pub fn new(len: usize, op: A) -> Result<Self> {
        ensure_invertible::<T, A>(&op)?;
        debug!("created fenwick tree: len={} op={}", len, op.name());
        Ok(Self::new_unchecked(len, op))
    }

    /// Create a tree without checking the operator; callers guarantee it is
    /// invertible.
    pub(crate) fn new_unchecked(len: usize, op: A) -> Self {
        FenwickTree {
            tree: vec![op.identity(); len + 1],
            op,
        }
    }

    /// Build a tree from a slice in O(n).
    pub fn from_slice(values: &[T], op: A) -> Result<Self> {
        ensure_invertible::<T, A>(&op)?;

        let n = values.len();
        let mut tree = Vec::with_capacity(n + 1);
        tree.push(op.identity());
        tree.extend(values.iter().cloned());

        for i in 1..=n {
            let parent = i + lowbit(i);
            if parent <= n {
                tree[parent] = op.combine(&tree[i], &tree[parent]);
            }
        }

        debug!("built fenwick tree: len={} op={}", n, op.name());

        Ok(FenwickTree { tree, op })
    }

    /// Combine `delta` into the element at `index`.
    pub fn update(&mut self, index: usize, delta: T) -> Result<()> {
        if index >= self.len() {
            return Err(ArboretumError::invalid_index(index, self.len()));
        }
        self.add_at(index, &delta);
        Ok(())
    }

    /// Unchecked form of [`update`](Self::update); `index` must be in bounds.
    pub(crate) fn add_at(&mut self, index: usize, delta: &T) {
        let n = self.len();
        let mut i = index + 1;
        while i <= n {
            self.tree[i] = self.op.combine(&self.tree[i], delta);
            i += lowbit(i);
        }
    }

    /// Aggregate of elements `[0, index]`.
    pub fn prefix_query(&self, index: usize) -> Result<T> {
        if index >= self.len() {
            return Err(ArboretumError::invalid_index(index, self.len()));
        }
        Ok(self.prefix(index + 1))
    }

    /// Aggregate of the first `count` elements.
    fn prefix(&self, count: usize) -> T {
        let mut acc = self.op.identity();
        let mut i = count;
        while i > 0 {
            acc = self.op.combine(&acc, &self.tree[i]);
            i -= lowbit(i);
        }
        acc
    }

    /// Aggregate of the inclusive range `[left, right]`, computed as
    /// `prefix(right)` combined with the inverse of `prefix(left - 1)`.
    pub fn range_query(&self, left: usize, right: usize) -> Result<T> {
        check_range(left, right, self.len())?;

        let upper = self.prefix(right + 1);
        if left == 0 {
            return Ok(upper);
        }
        let lower = self.prefix(left);
        let inverse = self.op.inverse(&lower).ok_or_else(|| no_inverse::<T, A>(&self.op))?;
        Ok(self.op.combine(&upper, &inverse))
    }

    /// The current element at `index`.
    pub fn get(&self, index: usize) -> Result<T> {
        self.range_query(index, index)
    }

    /// Overwrite the element at `index` with `value`.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        let current = self.get(index)?;
        let inverse = self
            .op
            .inverse(&current)
            .ok_or_else(|| no_inverse::<T, A>(&self.op))?;
        let delta = self.op.combine(&value, &inverse);
        self.add_at(index, &delta);
        Ok(())
    }

    /// Aggregate of every element.
    pub fn total(&self) -> T {
        self.prefix(self.len())
    }

    /// Smallest index whose prefix aggregate reaches `target`, in O(log n).
    ///
    /// Only meaningful when prefix aggregates are non-decreasing, e.g. sums
    /// of non-negative elements. Returns `None` if even the full prefix
    /// stays below `target`.
    pub fn lower_bound(&self, target: &T) -> Option<usize>
    where
        T: PartialOrd,
    {
        let n = self.len();
        if n == 0 {
            return None;
        }

        let mut pos = 0;
        let mut acc = self.op.identity();
        let mut step = 1usize << (usize::BITS - 1 - n.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= n {
                let candidate = self.op.combine(&acc, &self.tree[next]);
                if candidate < *target {
                    pos = next;
                    acc = candidate;
                }
            }
            step >>= 1;
        }

        (pos < n).then_some(pos)
    }
}

fn ensure_invertible<T, A: Aggregate<T>>(op: &A) -> Result<()> {
    if op.is_invertible() {
        Ok(())
    } else {
        Err(no_inverse::<T, A>(op))
    }
}

fn no_inverse<T, A: Aggregate<T>>(op: &A) -> ArboretumError {
    ArboretumError::unsupported(format!(
        "operator '{}' has no inverse and cannot back a Fenwick tree",
        op.name()
    ))
}

impl<T: Clone + fmt::Debug, A: Aggregate<T>> fmt::Debug for FenwickTree<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FenwickTree")
            .field("op", &self.op.name())
            .field("len", &self.len())
            .finish()
    }
}
