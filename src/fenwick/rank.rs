//! Coordinate compression and dynamic order statistics.
//!
//! [`RankSpace`] maps an arbitrary ordered value domain onto dense ranks
//! `0..len`. [`FrequencyTable`] keeps a Fenwick tree of counts over those
//! ranks, which turns "how many stored values are smaller than `v`" and
//! "what is the k-th smallest stored value" into O(log n) queries.

use log::trace;

use crate::aggregate::Sum;
use crate::error::{ArboretumError, Result};
use crate::fenwick::tree::FenwickTree;

/// A sorted, deduplicated value domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankSpace<V> {
    sorted: Vec<V>,
}

impl<V: Ord> RankSpace<V> {
    /// Compress `values` into a dense rank space.
    pub fn from_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut sorted: Vec<V> = values.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        RankSpace { sorted }
    }

    /// The rank of `value`, if it belongs to the domain.
    pub fn rank(&self, value: &V) -> Option<usize> {
        self.sorted.binary_search(value).ok()
    }

    /// Number of distinct domain values strictly less than `value`.
    ///
    /// Equal to [`rank`](Self::rank) for values in the domain.
    pub fn rank_below(&self, value: &V) -> usize {
        self.sorted.partition_point(|v| v < value)
    }

    /// The value holding `rank`.
    pub fn value(&self, rank: usize) -> Option<&V> {
        self.sorted.get(rank)
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the domain is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Domain values in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.sorted.iter()
    }
}

impl<V: Ord> FromIterator<V> for RankSpace<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        RankSpace::from_values(iter)
    }
}

/// A multiset over a fixed [`RankSpace`], backed by a Fenwick tree of
/// per-rank counts.
///
/// # Examples
///
/// ```
/// use arboretum::fenwick::{FrequencyTable, RankSpace};
///
/// let mut table = FrequencyTable::new(RankSpace::from_values([10, 20, 30, 40]));
/// table.insert(&30).unwrap();
/// table.insert(&10).unwrap();
/// table.insert(&30).unwrap();
///
/// assert_eq!(table.count_less(&30), 1);
/// assert_eq!(table.count_at_most(&30), 3);
/// assert_eq!(table.kth_smallest(1), Some(&30));
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<V> {
    ranks: RankSpace<V>,
    counts: FenwickTree<i64, Sum>,
    total: usize,
}

impl<V: Ord> FrequencyTable<V> {
    /// Create an empty table over `ranks`.
    pub fn new(ranks: RankSpace<V>) -> Self {
        let counts = FenwickTree::new_unchecked(ranks.len(), Sum);
        FrequencyTable {
            ranks,
            counts,
            total: 0,
        }
    }

    /// Create an empty table whose domain is the distinct items of `values`.
    pub fn for_values<I: IntoIterator<Item = V>>(values: I) -> Self {
        FrequencyTable::new(RankSpace::from_values(values))
    }

    /// The value domain.
    pub fn domain(&self) -> &RankSpace<V> {
        &self.ranks
    }

    /// Add one occurrence of `value`.
    ///
    /// Fails with [`ArboretumError::InvalidArgument`] if `value` lies outside
    /// the domain.
    pub fn insert(&mut self, value: &V) -> Result<()> {
        let rank = self.ranks.rank(value).ok_or_else(|| {
            ArboretumError::invalid_argument("value is outside the compressed domain")
        })?;
        self.bump(rank);
        Ok(())
    }

    fn bump(&mut self, rank: usize) {
        trace!("frequency table: insert rank {rank}");
        self.counts.add_at(rank, &1);
        self.total += 1;
    }

    /// Remove one occurrence of `value`. Returns `false` if none was stored.
    pub fn remove(&mut self, value: &V) -> bool {
        let Some(rank) = self.ranks.rank(value) else {
            return false;
        };
        if self.count_rank(rank) == 0 {
            return false;
        }
        self.counts.add_at(rank, &-1);
        self.total -= 1;
        true
    }

    fn count_rank(&self, rank: usize) -> usize {
        self.counts.get(rank).map_or(0, |count| count as usize)
    }

    /// Occurrences of `value`.
    pub fn count(&self, value: &V) -> usize {
        self.ranks
            .rank(value)
            .map_or(0, |rank| self.count_rank(rank))
    }

    /// Stored occurrences strictly less than `value`.
    pub fn count_less(&self, value: &V) -> usize {
        match self.ranks.rank_below(value) {
            0 => 0,
            below => self
                .counts
                .prefix_query(below - 1)
                .map_or(0, |count| count as usize),
        }
    }

    /// Stored occurrences less than or equal to `value`.
    pub fn count_at_most(&self, value: &V) -> usize {
        self.count_less(value) + self.count(value)
    }

    /// The `k`-th smallest stored value (0-based, duplicates counted).
    pub fn kth_smallest(&self, k: usize) -> Option<&V> {
        if k >= self.total {
            return None;
        }
        let rank = self.counts.lower_bound(&(k as i64 + 1))?;
        self.ranks.value(rank)
    }

    /// Total stored occurrences.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// For each element, count the elements after it that are strictly smaller.
///
/// Values are compressed to ranks, then the slice is scanned right to left,
/// querying the count of smaller ranks seen so far before recording the
/// current one. O(n log n).
///
/// ```
/// use arboretum::fenwick::count_smaller_after;
///
/// assert_eq!(count_smaller_after(&[5, 2, 6, 1]), vec![2, 1, 1, 0]);
/// ```
pub fn count_smaller_after<V: Ord>(values: &[V]) -> Vec<usize> {
    let mut table = FrequencyTable::for_values(values.iter());
    let mut counts = vec![0; values.len()];

    for (i, value) in values.iter().enumerate().rev() {
        counts[i] = table.count_less(&value);
        let rank = table.ranks.rank_below(&value);
        table.bump(rank);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_space() {
        let ranks = RankSpace::from_values([40, 10, 30, 10, 20]);
        assert_eq!(ranks.len(), 4);
        assert_eq!(ranks.rank(&10), Some(0));
        assert_eq!(ranks.rank(&40), Some(3));
        assert_eq!(ranks.rank(&25), None);
        assert_eq!(ranks.rank_below(&25), 2);
        assert_eq!(ranks.rank_below(&5), 0);
        assert_eq!(ranks.rank_below(&99), 4);
        assert_eq!(ranks.value(2), Some(&30));
        assert_eq!(ranks.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_frequency_table_counts() {
        let mut table = FrequencyTable::for_values(["b", "d", "a", "c"]);
        for v in ["c", "a", "c", "d"] {
            table.insert(&v).unwrap();
        }
        assert_eq!(table.len(), 4);
        assert_eq!(table.count(&"c"), 2);
        assert_eq!(table.count(&"b"), 0);
        assert_eq!(table.count_less(&"c"), 1);
        assert_eq!(table.count_at_most(&"c"), 3);
        assert_eq!(table.count_less(&"zz"), 4);

        assert!(table.insert(&"e").is_err());
    }

    #[test]
    fn test_remove() {
        let mut table = FrequencyTable::for_values([1, 2, 3]);
        table.insert(&2).unwrap();
        assert!(table.remove(&2));
        assert!(!table.remove(&2));
        assert!(!table.remove(&7));
        assert!(table.is_empty());
        assert_eq!(table.count_at_most(&3), 0);
    }

    #[test]
    fn test_kth_smallest() {
        let mut table = FrequencyTable::for_values(0..10);
        for v in [7, 3, 3, 9, 0] {
            table.insert(&v).unwrap();
        }
        let ordered: Vec<i32> = (0..table.len())
            .map(|k| *table.kth_smallest(k).unwrap())
            .collect();
        assert_eq!(ordered, vec![0, 3, 3, 7, 9]);
        assert_eq!(table.kth_smallest(5), None);
    }

    #[test]
    fn test_count_smaller_after() {
        assert_eq!(count_smaller_after(&[5, 2, 6, 1]), vec![2, 1, 1, 0]);
        assert_eq!(count_smaller_after(&[-1, -1]), vec![0, 0]);
        assert_eq!(count_smaller_after::<i32>(&[]), Vec::<usize>::new());
        assert_eq!(count_smaller_after(&[3, 2, 2, 6, 1]), vec![3, 1, 1, 1, 0]);
    }
}
