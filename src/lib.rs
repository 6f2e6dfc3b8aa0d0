//! Exact rational arithmetic over arbitrary-precision and fixed-width integers.
//!
//! This library provides `Rational<T>`, a fraction type that is always kept in
//! canonical form: positive denominator, numerator and denominator coprime,
//! zero stored as `0/1`. Every constructor and every operation finishes by
//! re-establishing that form, so structural equality is numeric equality.
//!
//! # Features
//!
//! - **Pluggable integers**: any type implementing [`BigInteger`]. `num-bigint`'s
//!   `BigInt` is the default; [`FixedInt`] wraps crypto-bigint U128..U4096.
//! - **Exact float import**: [`Rational::from_f64`] recovers the binary value a
//!   double actually stores, and [`Rational::to_f64`] rounds back correctly.
//! - **Text I/O**: `"7"`, `"-7/2"`, `"1.25"`, via [`Rational::read_from`] or
//!   [`str::parse`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use exact_ratio::BigRational;
//!
//! let a = BigRational::from_i64(1, 2);
//! let b = BigRational::from_i64(1, 3);
//!
//! let sum = &a + &b;
//! assert_eq!(sum.to_string(), "5/6");
//!
//! // Results are always reduced
//! let product = &a * &BigRational::from_i64(2, 3);
//! assert_eq!(product, BigRational::from_i64(1, 3));
//! ```
//!
//! ## Floats
//!
//! ```
//! use exact_ratio::BigRational;
//!
//! // 0.1 is not one tenth once stored as a double
//! let r = BigRational::from_f64(0.1).unwrap();
//! assert_ne!(r, BigRational::from_i64(1, 10));
//! assert_eq!(r.to_f64(), 0.1);
//! ```
//!
//! ## Fixed-width backend
//!
//! ```
//! use crypto_bigint::U512;
//! use exact_ratio::{FixedInt, Rational};
//!
//! let r = Rational::<FixedInt<U512>>::from_i64(-6, 8);
//! assert_eq!(r.to_string(), "-3/4");
//! ```

mod error;
mod fixed;
mod float;
mod fmt;
mod integer;
mod ops;
#[cfg(feature = "serde")]
mod serde_impl;

pub use crate::error::RationalError;
pub use crate::fixed::FixedInt;
pub use crate::integer::BigInteger;

use core::cmp::Ordering;

use num_bigint::BigInt;

/// A rational number `numer / denom` in lowest terms.
///
/// # Type Parameter
///
/// `T` must implement [`BigInteger`]. Defaults to `num_bigint::BigInt`.
///
/// # Invariants
///
/// - Denominator is never zero
/// - Denominator is positive; the sign lives in the numerator
/// - Numerator and denominator are coprime; zero is `0/1`
///
/// # Examples
///
/// ```
/// use exact_ratio::BigRational;
/// use num_bigint::BigInt;
///
/// let r = BigRational::from_i64(4, -6);
/// assert_eq!(r.numer(), &BigInt::from(-2));
/// assert_eq!(r.denom(), &BigInt::from(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational<T = BigInt> {
    numer: T,
    denom: T,
}

impl<T: BigInteger> Rational<T> {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a rational and reduce it to lowest terms.
    ///
    /// # Panics
    ///
    /// Panics with `zero denominator` if `denom` is zero. Use
    /// [`try_new`](Rational::try_new) for untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    /// use num_bigint::BigInt;
    ///
    /// let r = BigRational::new(BigInt::from(6), BigInt::from(-8));
    /// assert_eq!(r.to_string(), "-3/4");
    /// ```
    #[track_caller]
    pub fn new(numer: T, denom: T) -> Self {
        let mut r = Self { numer, denom };
        r.normalize();
        r
    }

    /// Create a rational, reporting a zero denominator as an error.
    pub fn try_new(numer: T, denom: T) -> Result<Self, RationalError> {
        if denom.is_zero_bool() {
            return Err(RationalError::ZeroDenominator);
        }
        Ok(Self::new(numer, denom))
    }

    /// Create from machine integers with automatic reduction.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[track_caller]
    #[inline]
    pub fn from_i64(numer: i64, denom: i64) -> Self {
        Self::new(T::from_i64(numer), T::from_i64(denom))
    }

    /// Create a rational representing the integer `n`.
    #[inline]
    pub fn from_integer(n: T) -> Self {
        Self {
            numer: n,
            denom: T::one(),
        }
    }

    /// Create a rational representing 0.
    #[inline]
    pub fn zero() -> Self {
        Self::from_integer(T::zero())
    }

    /// Create a rational representing 1.
    #[inline]
    pub fn one() -> Self {
        Self::from_integer(T::one())
    }

    /// Wrap a pair that is known to be canonical already.
    #[inline]
    pub(crate) fn from_canonical(numer: T, denom: T) -> Self {
        let r = Self { numer, denom };
        debug_assert!(r.is_canonical());
        r
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    #[inline]
    pub fn numer(&self) -> &T {
        &self.numer
    }

    /// The denominator, always positive.
    #[inline]
    pub fn denom(&self) -> &T {
        &self.denom
    }

    /// Split into `(numer, denom)`.
    #[inline]
    pub fn into_parts(self) -> (T, T) {
        (self.numer, self.denom)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.numer.is_zero_bool()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.numer.sign_i32() > 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.numer.sign_i32() < 0
    }

    /// Check if the rational represents an integer (denominator is 1).
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == T::one()
    }

    /// Sign as `-1`, `0` or `+1`.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.numer.sign_i32()
    }

    // ========================================================================
    // REDUCTION
    // ========================================================================

    /// Re-establish canonical form after a raw update of the fields.
    ///
    /// Moves a negative sign from the denominator to the numerator, then
    /// divides out the GCD. A zero denominator is fatal.
    #[track_caller]
    pub(crate) fn normalize(&mut self) {
        match self.denom.sign_i32() {
            0 => zero_denominator(&self.numer),
            s if s < 0 => {
                self.numer.negate();
                self.denom.negate();
            }
            _ => {}
        }

        let g = T::gcd(&self.numer, &self.denom);
        if g.ucmp(&T::one()) != Ordering::Equal {
            self.numer = self.numer.div_rem_trunc(&g).0;
            self.denom = self.denom.div_rem_trunc(&g).0;
        }

        debug_assert!(self.is_canonical());
    }

    /// Check the representation invariants.
    ///
    /// Always `true` for values produced by this crate.
    pub fn is_canonical(&self) -> bool {
        self.numer.is_valid()
            && self.denom.is_valid()
            && self.denom.sign_i32() > 0
            && T::gcd(&self.numer, &self.denom).ucmp(&T::one()) == Ordering::Equal
    }

    // ========================================================================
    // UNARY OPERATIONS
    // ========================================================================

    /// Flip the sign in place.
    #[inline]
    pub fn negate(&mut self) {
        self.numer.negate();
    }

    /// Get the absolute value.
    pub fn abs(&self) -> Self {
        let mut r = self.clone();
        if r.is_negative() {
            r.negate();
        }
        r
    }

    /// Replace the value by its reciprocal.
    ///
    /// # Panics
    ///
    /// Panics with `zero denominator` if the value is zero.
    #[track_caller]
    pub fn invert(&mut self) {
        core::mem::swap(&mut self.numer, &mut self.denom);
        match self.denom.sign_i32() {
            0 => zero_denominator(&self.numer),
            s if s < 0 => {
                self.numer.negate();
                self.denom.negate();
            }
            _ => {}
        }
    }

    /// Get the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the ratio is zero.
    #[track_caller]
    pub fn recip(&self) -> Self {
        let mut r = self.clone();
        r.invert();
        r
    }

    /// Compute `x * x`.
    pub fn square(&self) -> Self {
        Self::from_canonical(
            self.numer.mul_ref(&self.numer),
            self.denom.mul_ref(&self.denom),
        )
    }

    /// Raise to an integer power.
    ///
    /// Negative exponents raise the reciprocal. No reduction is needed since
    /// powers of coprime integers stay coprime.
    ///
    /// # Panics
    ///
    /// Panics with `zero denominator` when raising zero to a negative power.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    ///
    /// let r = BigRational::from_i64(2, 3);
    /// assert_eq!(r.pow(-2), BigRational::from_i64(9, 4));
    /// assert_eq!(BigRational::from_i64(-1, 2).pow(-3), BigRational::from_i64(-8, 1));
    /// ```
    #[track_caller]
    pub fn pow(&self, exponent: i32) -> Self {
        let e = exponent.unsigned_abs();
        if exponent >= 0 {
            return Self::from_canonical(self.numer.pow_u32(e), self.denom.pow_u32(e));
        }

        let mut numer = self.denom.pow_u32(e);
        let mut denom = self.numer.pow_u32(e);
        match denom.sign_i32() {
            0 => zero_denominator(&numer),
            s if s < 0 => {
                numer.negate();
                denom.negate();
            }
            _ => {}
        }
        Self::from_canonical(numer, denom)
    }

    /// Raise to a power given as a `T`.
    ///
    /// Returns `None` when the exponent does not fit in an `i32`.
    ///
    /// # Panics
    ///
    /// Panics with `zero denominator` when raising zero to a negative power.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    /// use num_bigint::BigInt;
    ///
    /// let r = BigRational::from_i64(3, 2);
    /// assert_eq!(r.pow_integer(&BigInt::from(-2)), Some(BigRational::from_i64(4, 9)));
    /// assert_eq!(r.pow_integer(&(BigInt::from(1) << 40u32)), None);
    /// ```
    #[track_caller]
    pub fn pow_integer(&self, exponent: &T) -> Option<Self> {
        let exponent = exponent.try_to_i64()?;
        let exponent = i32::try_from(exponent).ok()?;
        Some(self.pow(exponent))
    }

    /// Divide, returning `None` instead of panicking when `other` is zero.
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        Some(self / other)
    }

    // ========================================================================
    // COMPARISON
    // ========================================================================

    /// Three-way numeric comparison.
    ///
    /// Differing numerator signs decide immediately; otherwise the cross
    /// products are compared, which preserves order because denominators are
    /// positive.
    pub fn compare(&self, other: &Self) -> Ordering {
        let xs = self.numer.sign_i32();
        let ys = other.numer.sign_i32();
        match xs.cmp(&ys) {
            Ordering::Equal if xs != 0 => {
                let ad = self.numer.mul_ref(&other.denom);
                let bc = self.denom.mul_ref(&other.numer);
                ad.cmp(&bc)
            }
            ord => ord,
        }
    }

    // ========================================================================
    // ROUNDING
    // ========================================================================

    /// Integer part, rounding toward zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    /// use num_bigint::BigInt;
    ///
    /// assert_eq!(BigRational::from_i64(-3, 2).trunc(), BigInt::from(-1));
    /// ```
    pub fn trunc(&self) -> T {
        self.numer.div_rem_trunc(&self.denom).0
    }

    /// Largest integer not above the value.
    pub fn floor(&self) -> T {
        let (q, r) = self.numer.div_rem_trunc(&self.denom);
        if self.numer.sign_i32() < 0 && !r.is_zero_bool() {
            q.sub_ref(&T::one())
        } else {
            q
        }
    }

    /// Smallest integer not below the value.
    pub fn ceil(&self) -> T {
        let (q, r) = self.numer.div_rem_trunc(&self.denom);
        if self.numer.sign_i32() >= 0 && !r.is_zero_bool() {
            q.add_ref(&T::one())
        } else {
            q
        }
    }

    /// Nearest integer, halves rounded away from zero.
    pub fn round(&self) -> T {
        let (q, mut r) = self.numer.div_rem_trunc(&self.denom);
        if r.sign_i32() < 0 {
            r.negate();
        }
        // 2|r| < denom, without doubling past the width of T
        let complement = self.denom.sub_ref(&r);
        if r.ucmp(&complement) == Ordering::Less {
            q
        } else if self.numer.sign_i32() >= 0 {
            q.add_ref(&T::one())
        } else {
            q.sub_ref(&T::one())
        }
    }
}

/// Fatal path for a zero denominator.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn zero_denominator<T: BigInteger>(numer: &T) -> ! {
    tracing::error!(numerator = %numer, "rational with zero denominator");
    panic!("zero denominator");
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

impl<T: BigInteger> PartialOrd for Rational<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: BigInteger> Ord for Rational<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<T: BigInteger> Default for Rational<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: BigInteger> From<T> for Rational<T> {
    fn from(n: T) -> Self {
        Self::from_integer(n)
    }
}

impl<T: BigInteger> From<i64> for Rational<T> {
    fn from(n: i64) -> Self {
        Self::from_integer(T::from_i64(n))
    }
}

// ============================================================================
// TYPE ALIASES
// ============================================================================

/// Rational over arbitrary-precision `num-bigint` integers.
pub type BigRational = Rational<BigInt>;

/// Rational using 128-bit magnitudes.
pub type RationalI128 = Rational<FixedInt<crypto_bigint::U128>>;

/// Rational using 256-bit magnitudes.
pub type RationalI256 = Rational<FixedInt<crypto_bigint::U256>>;

/// Rational using 512-bit magnitudes.
pub type RationalI512 = Rational<FixedInt<crypto_bigint::U512>>;

/// Rational using 1024-bit magnitudes.
pub type RationalI1024 = Rational<FixedInt<crypto_bigint::U1024>>;

/// Rational using 2048-bit magnitudes (enough for any `f64`).
pub type RationalI2048 = Rational<FixedInt<crypto_bigint::U2048>>;

/// Rational using 4096-bit magnitudes.
pub type RationalI4096 = Rational<FixedInt<crypto_bigint::U4096>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: i64, d: i64) -> BigRational {
        BigRational::from_i64(n, d)
    }

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_normalize_moves_sign_and_reduces() {
        let x = r(6, -8);
        assert_eq!(x.numer(), &big(-3));
        assert_eq!(x.denom(), &big(4));
        assert!(x.is_canonical());

        let y = r(-6, -8);
        assert_eq!(y.into_parts(), (big(3), big(4)));
    }

    #[test]
    fn test_zero_is_zero_over_one() {
        let z = r(0, -17);
        assert_eq!(z.numer(), &big(0));
        assert_eq!(z.denom(), &big(1));
        assert_eq!(z, BigRational::zero());
        assert_eq!(BigRational::default(), BigRational::zero());
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn test_zero_denominator_is_fatal() {
        let _ = r(3, 0);
    }

    #[test]
    fn test_try_new_reports_zero_denominator() {
        assert_eq!(
            BigRational::try_new(big(3), big(0)),
            Err(RationalError::ZeroDenominator)
        );
        assert_eq!(BigRational::try_new(big(3), big(6)), Ok(r(1, 2)));
    }

    #[test]
    fn test_predicates() {
        assert!(r(1, 2).is_positive());
        assert!(r(-1, 2).is_negative());
        assert!(r(0, 1).is_zero());
        assert!(r(4, 2).is_integer());
        assert!(!r(3, 2).is_integer());
        assert_eq!(r(-5, 3).signum(), -1);
    }

    #[test]
    fn test_abs_invert_square() {
        assert_eq!(r(-3, 4).abs(), r(3, 4));
        assert_eq!(r(-3, 4).recip(), r(-4, 3));
        let mut x = r(5, 7);
        x.invert();
        assert_eq!(x, r(7, 5));
        assert_eq!(r(-2, 3).square(), r(4, 9));
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn test_invert_zero_is_fatal() {
        let mut z = BigRational::zero();
        z.invert();
    }

    #[test]
    fn test_compare() {
        assert_eq!(r(1, 2).compare(&r(2, 3)), Ordering::Less);
        assert_eq!(r(-1, 3).compare(&r(1, 3)), Ordering::Less);
        assert_eq!(r(2, 4).compare(&r(1, 2)), Ordering::Equal);
        assert_eq!(r(0, 1).compare(&r(-1, 9)), Ordering::Greater);
        assert_eq!(r(-1, 2).compare(&r(-2, 3)), Ordering::Greater);
        assert!(r(7, 3) > r(2, 1));
    }

    #[test]
    fn test_rounding_boundaries() {
        let x = r(-3, 2);
        assert_eq!(x.floor(), big(-2));
        assert_eq!(x.ceil(), big(-1));
        assert_eq!(x.round(), big(-2));
        assert_eq!(x.trunc(), big(-1));

        let y = r(3, 2);
        assert_eq!(y.floor(), big(1));
        assert_eq!(y.ceil(), big(2));
        assert_eq!(y.round(), big(2));
        assert_eq!(y.trunc(), big(1));
    }

    #[test]
    fn test_rounding_exact_integers_and_small_fractions() {
        assert_eq!(r(-4, 1).floor(), big(-4));
        assert_eq!(r(-4, 1).ceil(), big(-4));
        assert_eq!(r(7, 5).round(), big(1));
        assert_eq!(r(-7, 5).round(), big(-1));
        assert_eq!(r(1, 3).ceil(), big(1));
        assert_eq!(r(-1, 3).floor(), big(-1));
        assert_eq!(r(-1, 3).round(), big(0));
    }

    #[test]
    fn test_pow() {
        assert_eq!(r(2, 3).pow(-2), r(9, 4));
        assert_eq!(r(2, 3).pow(3), r(8, 27));
        assert_eq!(r(-2, 3).pow(-3), r(-27, 8));
        assert_eq!(r(0, 1).pow(0), r(1, 1));
        assert!(r(-2, 3).pow(-3).is_canonical());
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn test_pow_zero_negative_exponent_is_fatal() {
        let _ = BigRational::zero().pow(-1);
    }

    #[test]
    fn test_pow_integer() {
        assert_eq!(r(2, 3).pow_integer(&big(3)), Some(r(8, 27)));
        assert_eq!(r(2, 3).pow_integer(&big(-1)), Some(r(3, 2)));
        assert_eq!(r(2, 3).pow_integer(&big(i64::from(i32::MAX) + 1)), None);
        assert_eq!(r(2, 3).pow_integer(&big(i64::MIN)), None);
        let x = RationalI256::from_i64(-1, 3);
        assert_eq!(
            x.pow_integer(&FixedInt::from_i64(-4)),
            Some(RationalI256::from_i64(81, 1))
        );
    }

    #[test]
    fn test_round_at_width_limit() {
        // 2^127 / (2^127 + 1): the remainder fills all 128 bits
        let numer = FixedInt::<crypto_bigint::U128>::one().shl_vartime_u32(127);
        let denom = numer.add_ref(&FixedInt::one());
        let x = RationalI128::new(numer, denom);
        assert_eq!(x.round(), FixedInt::one());
        assert_eq!(x.floor(), FixedInt::zero());
        assert_eq!(x.ceil(), FixedInt::one());
        let y = -x;
        assert_eq!(y.round().to_string(), "-1");

        // 2^126 / (2^127 - 1) is just above one half
        let numer = FixedInt::<crypto_bigint::U128>::one().shl_vartime_u32(126);
        let denom = numer.shl_vartime_u32(1).sub_ref(&FixedInt::one());
        assert_eq!(RationalI128::new(numer, denom).round(), FixedInt::one());
    }

    #[test]
    fn test_checked_div() {
        assert_eq!(r(1, 2).checked_div(&r(1, 4)), Some(r(2, 1)));
        assert_eq!(r(1, 2).checked_div(&BigRational::zero()), None);
    }

    #[test]
    fn test_fixed_backend_core_operations() {
        let x = RationalI256::from_i64(-3, 2);
        assert_eq!(x.floor().to_string(), "-2");
        assert_eq!(x.round().to_string(), "-2");
        assert_eq!(x.pow(-2), RationalI256::from_i64(4, 9));
        assert!(RationalI256::from_i64(1, 3) < RationalI256::from_i64(1, 2));
    }
}
