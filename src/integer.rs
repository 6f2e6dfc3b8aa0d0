//! The integer contract consumed by `Rational<T>`.
//!
//! `Rational<T>` never looks inside its integers. Everything it needs is
//! expressed by [`BigInteger`]: ring operations, truncating division, sign,
//! magnitude shifts, GCD and a handful of conversions.
//!
//! # Implementations
//!
//! - [`num_bigint::BigInt`]: arbitrary precision, never overflows. This is the
//!   default backend.
//! - [`FixedInt<U>`](crate::FixedInt): sign-magnitude wrapper over a
//!   crypto-bigint unsigned integer. Panics on overflow.
//!
//! # Example
//!
//! ```
//! use exact_ratio::BigInteger;
//! use num_bigint::BigInt;
//!
//! let a = BigInt::from_i64(-48);
//! let b = BigInt::from_i64(18);
//! assert_eq!(BigInt::gcd(&a, &b), BigInt::from_i64(6));
//! assert_eq!(a.div_rem_trunc(&b), (BigInt::from_i64(-2), BigInt::from_i64(-12)));
//! ```

use core::cmp::Ordering;
use core::fmt::{Debug, Display};

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Pow, ToPrimitive, Zero};

/// Signed integer operations required by `Rational<T>`.
///
/// Method names carry a suffix where they would otherwise collide with
/// inherent or `num-traits` methods of the implementing types.
///
/// `Ord` must be the signed numeric order. `Display` must render the value in
/// decimal with a leading `-` for negative values.
pub trait BigInteger: Clone + Debug + Display + PartialEq + Eq + PartialOrd + Ord + Sized + 'static {
    /// The zero value.
    fn zero() -> Self;

    /// The one value.
    fn one() -> Self;

    /// Create from a machine integer.
    fn from_i64(n: i64) -> Self;

    /// Convert to a machine integer, `None` if out of range.
    fn try_to_i64(&self) -> Option<i64>;

    /// Sign as `-1`, `0` or `+1`.
    fn sign_i32(&self) -> i32;

    /// Returns `true` if this value is zero.
    fn is_zero_bool(&self) -> bool {
        self.sign_i32() == 0
    }

    /// Flip the sign in place. Zero stays zero.
    fn negate(&mut self);

    fn add_ref(&self, other: &Self) -> Self;

    fn sub_ref(&self, other: &Self) -> Self;

    fn mul_ref(&self, other: &Self) -> Self;

    /// Quotient rounded toward zero and the remainder, which carries the sign
    /// of the dividend.
    ///
    /// Panics if `divisor` is zero.
    fn div_rem_trunc(&self, divisor: &Self) -> (Self, Self);

    /// Shift the magnitude left, keeping the sign.
    fn shl_vartime_u32(&self, shift: u32) -> Self;

    /// Shift the magnitude right, keeping the sign (rounds toward zero).
    fn shr_vartime_u32(&self, shift: u32) -> Self;

    /// Number of significant bits in the magnitude. Zero has no bits.
    fn bits_u64(&self) -> u64;

    /// Least significant 64 bits of the magnitude.
    fn first_word(&self) -> u64;

    /// Compare magnitudes, ignoring signs.
    fn ucmp(&self, other: &Self) -> Ordering;

    /// Greatest common divisor of the magnitudes. `gcd(0, b) == |b|`.
    fn gcd(a: &Self, b: &Self) -> Self;

    /// Raise to a non-negative power.
    fn pow_u32(&self, exponent: u32) -> Self;

    /// Internal consistency check of the representation.
    fn is_valid(&self) -> bool {
        true
    }

    /// Largest bit length a magnitude can reach, `None` when unbounded.
    fn max_bits() -> Option<u64> {
        None
    }
}

impl BigInteger for BigInt {
    #[inline]
    fn zero() -> Self {
        Zero::zero()
    }

    #[inline]
    fn one() -> Self {
        One::one()
    }

    #[inline]
    fn from_i64(n: i64) -> Self {
        BigInt::from(n)
    }

    #[inline]
    fn try_to_i64(&self) -> Option<i64> {
        ToPrimitive::to_i64(self)
    }

    #[inline]
    fn sign_i32(&self) -> i32 {
        match BigInt::sign(self) {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    #[inline]
    fn is_zero_bool(&self) -> bool {
        Zero::is_zero(self)
    }

    #[inline]
    fn negate(&mut self) {
        *self = -core::mem::take(self);
    }

    #[inline]
    fn add_ref(&self, other: &Self) -> Self {
        self + other
    }

    #[inline]
    fn sub_ref(&self, other: &Self) -> Self {
        self - other
    }

    #[inline]
    fn mul_ref(&self, other: &Self) -> Self {
        self * other
    }

    #[inline]
    fn div_rem_trunc(&self, divisor: &Self) -> (Self, Self) {
        // num-integer's div_rem truncates toward zero for BigInt
        Integer::div_rem(self, divisor)
    }

    #[inline]
    fn shl_vartime_u32(&self, shift: u32) -> Self {
        self << shift
    }

    #[inline]
    fn shr_vartime_u32(&self, shift: u32) -> Self {
        // `>>` on BigInt floors, which differs from truncation for negatives
        BigInt::from_biguint(BigInt::sign(self), self.magnitude() >> shift)
    }

    #[inline]
    fn bits_u64(&self) -> u64 {
        BigInt::bits(self)
    }

    #[inline]
    fn first_word(&self) -> u64 {
        self.magnitude().iter_u64_digits().next().unwrap_or(0)
    }

    #[inline]
    fn ucmp(&self, other: &Self) -> Ordering {
        self.magnitude().cmp(other.magnitude())
    }

    #[inline]
    fn gcd(a: &Self, b: &Self) -> Self {
        Integer::gcd(a, b)
    }

    #[inline]
    fn pow_u32(&self, exponent: u32) -> Self {
        Pow::pow(self, exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        <BigInt as BigInteger>::from_i64(n)
    }

    #[test]
    fn test_gcd_ignores_signs() {
        assert_eq!(<BigInt as BigInteger>::gcd(&big(-48), &big(18)), big(6));
        assert_eq!(<BigInt as BigInteger>::gcd(&big(48), &big(-18)), big(6));
        assert_eq!(<BigInt as BigInteger>::gcd(&big(0), &big(-7)), big(7));
    }

    #[test]
    fn test_div_rem_truncates_toward_zero() {
        assert_eq!(big(7).div_rem_trunc(&big(2)), (big(3), big(1)));
        assert_eq!(big(-7).div_rem_trunc(&big(2)), (big(-3), big(-1)));
        assert_eq!(big(7).div_rem_trunc(&big(-2)), (big(-3), big(1)));
        assert_eq!(big(-7).div_rem_trunc(&big(-2)), (big(3), big(-1)));
    }

    #[test]
    fn test_shifts_act_on_magnitude() {
        assert_eq!(big(-5).shl_vartime_u32(3), big(-40));
        assert_eq!(big(-5).shr_vartime_u32(1), big(-2));
        assert_eq!(big(-1).shr_vartime_u32(1), big(0));
        assert_eq!(big(5).shr_vartime_u32(1), big(2));
    }

    #[test]
    fn test_sign_and_negate() {
        let mut x = big(12);
        assert_eq!(x.sign_i32(), 1);
        x.negate();
        assert_eq!(x, big(-12));
        assert_eq!(x.sign_i32(), -1);
        let mut zero = big(0);
        zero.negate();
        assert_eq!(zero.sign_i32(), 0);
        assert!(zero.is_zero_bool());
    }

    #[test]
    fn test_bits_and_first_word() {
        assert_eq!(big(0).bits_u64(), 0);
        assert_eq!(big(-255).bits_u64(), 8);
        let wide = big(1).shl_vartime_u32(70).add_ref(&big(9));
        assert_eq!(wide.first_word(), 9);
        assert_eq!(wide.bits_u64(), 71);
        assert_eq!(wide.try_to_i64(), None);
        assert_eq!(big(i64::MIN).try_to_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_bigint_is_unbounded() {
        assert_eq!(<BigInt as BigInteger>::max_bits(), None);
    }

    #[test]
    fn test_ucmp_and_pow() {
        assert_eq!(big(-9).ucmp(&big(3)), Ordering::Greater);
        assert_eq!(big(-3).ucmp(&big(3)), Ordering::Equal);
        assert_eq!(big(-3).pow_u32(3), big(-27));
        assert_eq!(big(10).pow_u32(0), big(1));
    }
}
