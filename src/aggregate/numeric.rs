//! Numeric capabilities required by the built-in operators.

/// Types with a zero and a total additive inverse.
///
/// Integers use wrapping arithmetic so that negation is defined for every
/// value, including unsigned types.
pub trait Summable: Copy {
    const ZERO: Self;

    fn sum_with(self, other: Self) -> Self;

    fn negated(self) -> Self;
}

/// Types with a lowest and a highest value, used as min/max identities.
pub trait Bounded: Copy + PartialOrd {
    const LOWEST: Self;
    const HIGHEST: Self;
}

/// Integer types supporting gcd and xor.
pub trait Integral: Copy + PartialEq {
    const ZERO: Self;

    /// Non-negative gcd, computed on magnitudes.
    ///
    /// For signed types the one unrepresentable result, `2^(BITS - 1)` from
    /// `gcd(MIN, 0)` or `gcd(MIN, MIN)`, wraps to `MIN`.
    fn gcd_with(self, other: Self) -> Self;

    fn xor_with(self, other: Self) -> Self;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                const ZERO: Self = 0;

                #[inline]
                fn sum_with(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }

                #[inline]
                fn negated(self) -> Self {
                    self.wrapping_neg()
                }
            }

            impl Bounded for $t {
                const LOWEST: Self = <$t>::MIN;
                const HIGHEST: Self = <$t>::MAX;
            }
        )*
    };
}

macro_rules! impl_integral_signed {
    ($($t:ty => $u:ty),*) => {
        $(
            impl Integral for $t {
                const ZERO: Self = 0;

                fn gcd_with(self, other: Self) -> Self {
                    let (mut a, mut b): ($u, $u) = (self.unsigned_abs(), other.unsigned_abs());
                    while b != 0 {
                        let r = a % b;
                        a = b;
                        b = r;
                    }
                    // 2^(BITS - 1) has no positive representation and wraps to MIN.
                    a as $t
                }

                #[inline]
                fn xor_with(self, other: Self) -> Self {
                    self ^ other
                }
            }
        )*
    };
}

macro_rules! impl_integral_unsigned {
    ($($t:ty),*) => {
        $(
            impl Integral for $t {
                const ZERO: Self = 0;

                fn gcd_with(self, other: Self) -> Self {
                    let (mut a, mut b) = (self, other);
                    while b != 0 {
                        let r = a % b;
                        a = b;
                        b = r;
                    }
                    a
                }

                #[inline]
                fn xor_with(self, other: Self) -> Self {
                    self ^ other
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl Summable for $t {
                const ZERO: Self = 0.0;

                #[inline]
                fn sum_with(self, other: Self) -> Self {
                    self + other
                }

                #[inline]
                fn negated(self) -> Self {
                    -self
                }
            }

            impl Bounded for $t {
                const LOWEST: Self = <$t>::NEG_INFINITY;
                const HIGHEST: Self = <$t>::INFINITY;
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_integral_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);
impl_integral_unsigned!(u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_negation_wraps() {
        let x: u32 = 5;
        assert_eq!(x.sum_with(x.negated()), 0);
        assert_eq!(10u32.sum_with(3u32.negated()), 7);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(12u64.gcd_with(18), 6);
        assert_eq!(0u64.gcd_with(9), 9);
        assert_eq!(9u64.gcd_with(0), 9);
        assert_eq!((-12i64).gcd_with(18), 6);
        assert_eq!(12i64.gcd_with(-18), 6);
        assert_eq!(0i32.gcd_with(0), 0);
    }

    #[test]
    fn test_signed_gcd_at_min() {
        assert_eq!(i64::MIN.gcd_with(6), 2);
        assert_eq!(6i64.gcd_with(i64::MIN), 2);
        assert_eq!(i8::MIN.gcd_with(-64), 64);
        assert_eq!(i32::MIN.gcd_with(i32::MIN / 2), 1 << 30);
        // 2^63 does not fit in i64.
        assert_eq!(i64::MIN.gcd_with(0), i64::MIN);
    }

    #[test]
    fn test_float_bounds() {
        assert_eq!(<f64 as Bounded>::HIGHEST, f64::INFINITY);
        assert!(1.5f64.sum_with(2.0) == 3.5);
    }
}
