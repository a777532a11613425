//! Built-in combine operators.

use std::fmt;

use crate::aggregate::Aggregate;
use crate::aggregate::numeric::{Bounded, Integral, Summable};

/// Addition. Invertible (negation), so valid for Fenwick trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sum;

/// Minimum. Identity is the type's highest value; not invertible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Min;

/// Maximum. Identity is the type's lowest value; not invertible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Max;

/// Greatest common divisor. Identity is zero; not invertible.
///
/// Results are non-negative except for signed `gcd(MIN, 0)` and
/// `gcd(MIN, MIN)`, which wrap to `MIN` (see [`Integral::gcd_with`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gcd;

/// Bitwise exclusive or. Every value is its own inverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Xor;

impl<T: Summable> Aggregate<T> for Sum {
    #[inline]
    fn identity(&self) -> T {
        T::ZERO
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        left.sum_with(*right)
    }

    #[inline]
    fn inverse(&self, value: &T) -> Option<T> {
        Some(value.negated())
    }

    fn name(&self) -> &str {
        "sum"
    }
}

impl<T: Bounded> Aggregate<T> for Min {
    #[inline]
    fn identity(&self) -> T {
        T::HIGHEST
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        if right < left { *right } else { *left }
    }

    fn name(&self) -> &str {
        "min"
    }
}

impl<T: Bounded> Aggregate<T> for Max {
    #[inline]
    fn identity(&self) -> T {
        T::LOWEST
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        if right > left { *right } else { *left }
    }

    fn name(&self) -> &str {
        "max"
    }
}

impl<T: Integral> Aggregate<T> for Gcd {
    #[inline]
    fn identity(&self) -> T {
        T::ZERO
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        left.gcd_with(*right)
    }

    fn name(&self) -> &str {
        "gcd"
    }
}

impl<T: Integral> Aggregate<T> for Xor {
    #[inline]
    fn identity(&self) -> T {
        T::ZERO
    }

    #[inline]
    fn combine(&self, left: &T, right: &T) -> T {
        left.xor_with(*right)
    }

    #[inline]
    fn inverse(&self, value: &T) -> Option<T> {
        Some(*value)
    }

    fn name(&self) -> &str {
        "xor"
    }
}

/// A caller-supplied operator built from an identity value and a closure.
///
/// The closure must be associative. Closure-backed operators never report an
/// inverse, so they can back a segment tree but not a Fenwick tree.
///
/// ```
/// use arboretum::aggregate::FnAggregate;
/// use arboretum::segment::SegmentTree;
///
/// let product = FnAggregate::new("product", 1u64, |a: &u64, b: &u64| a * b);
/// let tree = SegmentTree::build(&[2, 3, 4], product);
/// assert_eq!(tree.query(0, 2).unwrap(), 24);
/// ```
#[derive(Clone)]
pub struct FnAggregate<T, F> {
    name: String,
    identity: T,
    combine: F,
}

impl<T, F> FnAggregate<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    /// Create a new closure-backed operator.
    pub fn new<S: Into<String>>(name: S, identity: T, combine: F) -> Self {
        FnAggregate {
            name: name.into(),
            identity,
            combine,
        }
    }
}

impl<T, F> Aggregate<T> for FnAggregate<T, F>
where
    T: Clone,
    F: Fn(&T, &T) -> T,
{
    fn identity(&self) -> T {
        self.identity.clone()
    }

    fn combine(&self, left: &T, right: &T) -> T {
        (self.combine)(left, right)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: fmt::Debug, F> fmt::Debug for FnAggregate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAggregate")
            .field("name", &self.name)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identities_are_neutral() {
        for x in [-7i64, 0, 3, i64::MAX] {
            assert_eq!(Sum.combine(&Aggregate::<i64>::identity(&Sum), &x), x);
            assert_eq!(Min.combine(&x, &Aggregate::<i64>::identity(&Min)), x);
            assert_eq!(Max.combine(&Aggregate::<i64>::identity(&Max), &x), x);
            assert_eq!(Xor.combine(&x, &Aggregate::<i64>::identity(&Xor)), x);
        }
        assert_eq!(Gcd.combine(&Aggregate::<u32>::identity(&Gcd), &12u32), 12);
    }

    #[test]
    fn test_invertibility() {
        assert!(Aggregate::<i64>::is_invertible(&Sum));
        assert!(Aggregate::<u8>::is_invertible(&Xor));
        assert!(!Aggregate::<i64>::is_invertible(&Min));
        assert!(!Aggregate::<i64>::is_invertible(&Max));
        assert!(!Aggregate::<i64>::is_invertible(&Gcd));

        let x = 42i64;
        let inv = Sum.inverse(&x).unwrap();
        assert_eq!(Sum.combine(&x, &inv), 0);
    }

    #[test]
    fn test_float_min_max() {
        assert_eq!(Min.combine(&2.5f64, &-1.0), -1.0);
        assert_eq!(Max.combine(&2.5f64, &-1.0), 2.5);
        assert_eq!(Aggregate::<f64>::identity(&Min), f64::INFINITY);
    }

    #[test]
    fn test_fn_aggregate() {
        let concat = FnAggregate::new("concat", String::new(), |a: &String, b: &String| {
            format!("{a}{b}")
        });
        assert_eq!(concat.combine(&"ab".to_string(), &"cd".to_string()), "abcd");
        assert_eq!(concat.identity(), "");
        assert!(!concat.is_invertible());
        assert_eq!(concat.name(), "concat");
    }
}
