//! Combine operators shared by the array-backed range structures.
//!
//! A [`SegmentTree`](crate::segment::SegmentTree) only needs an associative
//! `combine` with an identity element. A
//! [`FenwickTree`](crate::fenwick::FenwickTree) additionally needs an
//! `inverse`, which is why min/max/gcd can back the former but not the latter.
//!
//! # Examples
//!
//! ```
//! use arboretum::aggregate::{Aggregate, Max, Sum};
//!
//! assert_eq!(Aggregate::<i64>::combine(&Sum, &3, &4), 7);
//! assert_eq!(Aggregate::<i64>::identity(&Max), i64::MIN);
//! assert!(Aggregate::<i64>::is_invertible(&Sum));
//! assert!(!Aggregate::<i64>::is_invertible(&Max));
//! ```

pub mod kind;
pub mod numeric;
pub mod ops;

pub use kind::AggregateKind;
pub use numeric::{Bounded, Integral, Summable};
pub use ops::{FnAggregate, Gcd, Max, Min, Sum, Xor};

/// An associative combine operator over values of type `T`.
///
/// `combine(identity(), x) == x == combine(x, identity())` must hold for all
/// `x`, and `combine` must be associative. Operators that form a group also
/// report an `inverse`.
pub trait Aggregate<T> {
    /// The neutral element returned for an empty range.
    fn identity(&self) -> T;

    /// Merge two adjacent aggregates, `left` covering the lower indices.
    fn combine(&self, left: &T, right: &T) -> T;

    /// The element that cancels `value` under `combine`, if the operator has one.
    fn inverse(&self, _value: &T) -> Option<T> {
        None
    }

    /// Whether [`inverse`](Aggregate::inverse) is defined for this operator.
    fn is_invertible(&self) -> bool {
        self.inverse(&self.identity()).is_some()
    }

    /// Short name used in log records and error messages.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<T, A: Aggregate<T> + ?Sized> Aggregate<T> for &A {
    fn identity(&self) -> T {
        (**self).identity()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (**self).combine(left, right)
    }

    fn inverse(&self, value: &T) -> Option<T> {
        (**self).inverse(value)
    }

    fn is_invertible(&self) -> bool {
        (**self).is_invertible()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T, A: Aggregate<T> + ?Sized> Aggregate<T> for Box<A> {
    fn identity(&self) -> T {
        (**self).identity()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (**self).combine(left, right)
    }

    fn inverse(&self, value: &T) -> Option<T> {
        (**self).inverse(value)
    }

    fn is_invertible(&self) -> bool {
        (**self).is_invertible()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Fold `op` over `values` from the identity. Used as the naive reference
/// when cross-checking cached aggregates.
pub fn fold<T, A: Aggregate<T> + ?Sized>(op: &A, values: &[T]) -> T {
    values
        .iter()
        .fold(op.identity(), |acc, value| op.combine(&acc, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_matches_manual_combination() {
        let values = [4i64, -2, 9, 1];
        assert_eq!(fold(&Sum, &values), 12);
        assert_eq!(fold(&Min, &values), -2);
        assert_eq!(fold(&Max, &values), 9);
        assert_eq!(fold(&Sum, &[] as &[i64]), 0);
    }

    #[test]
    fn test_boxed_trait_object_forwards() {
        let op: Box<dyn Aggregate<u32>> = Box::new(Xor);
        assert_eq!(op.combine(&0b1100, &0b1010), 0b0110);
        assert_eq!(op.inverse(&7), Some(7));
        assert!(op.is_invertible());
        assert_eq!(op.name(), "xor");
    }

    #[test]
    fn test_reference_forwards() {
        let op = Gcd;
        let by_ref = &op;
        assert_eq!(Aggregate::<u64>::combine(&by_ref, &12, &18), 6);
        assert!(!Aggregate::<u64>::is_invertible(&by_ref));
    }
}
