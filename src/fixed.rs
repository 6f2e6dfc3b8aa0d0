//! Fixed-width signed integers over crypto-bigint.
//!
//! [`FixedInt<U>`] pairs a crypto-bigint unsigned integer with an explicit
//! sign flag so that it can satisfy the signed [`BigInteger`] contract. The
//! magnitude never grows: every operation whose exact result does not fit in
//! `U` panics with `integer overflow`.
//!
//! Supported widths: U128, U256, U512, U1024, U2048, U4096.
//!
//! # Example
//!
//! ```
//! use crypto_bigint::U256;
//! use exact_ratio::{BigInteger, FixedInt};
//!
//! let a = FixedInt::<U256>::from_i64(-12);
//! let b = FixedInt::<U256>::from_i64(5);
//! assert_eq!(a.mul_ref(&b).to_string(), "-60");
//! assert_eq!(*a.magnitude(), U256::from_u64(12));
//! ```

use core::cmp::Ordering;
use core::fmt;

use crypto_bigint::{Word, U1024, U128, U2048, U256, U4096, U512};

use crate::integer::BigInteger;

/// Sign-magnitude integer backed by a crypto-bigint unsigned integer.
///
/// # Invariants
///
/// - Zero is always represented with `negative = false`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedInt<U> {
    magnitude: U,
    negative: bool,
}

/// Decimal digits per chunk when rendering; `10^19` is the largest power of ten
/// below `2^64`.
const DECIMAL_CHUNK: u64 = 10_000_000_000_000_000_000;

/// Least significant 64 bits of a little-endian word slice.
#[inline]
fn low_u64(words: &[Word]) -> u64 {
    // Architecture-aware: handle both 32-bit and 64-bit word sizes
    #[cfg(target_pointer_width = "32")]
    {
        match words {
            [lo, hi, ..] => (*lo as u64) | ((*hi as u64) << 32),
            [lo] => *lo as u64,
            [] => 0,
        }
    }
    #[cfg(not(target_pointer_width = "32"))]
    {
        words.first().map_or(0, |w| *w as u64)
    }
}

#[cold]
#[inline(never)]
fn overflow() -> ! {
    panic!("integer overflow");
}

macro_rules! impl_fixed_integer {
    ($uint:ty, $bits:expr) => {
        impl FixedInt<$uint> {
            /// Number of bits available to the magnitude.
            pub const BITS: u32 = $bits;

            /// Create from a magnitude and a sign. A zero magnitude is never
            /// negative.
            #[inline]
            pub fn new(magnitude: $uint, negative: bool) -> Self {
                let negative = negative && magnitude != <$uint>::ZERO;
                Self { magnitude, negative }
            }

            #[inline]
            pub fn magnitude(&self) -> &$uint {
                &self.magnitude
            }

            #[inline]
            pub fn is_negative(&self) -> bool {
                self.negative
            }

            fn gcd_magnitude(mut a: $uint, mut b: $uint) -> $uint {
                if a == <$uint>::ZERO {
                    return b;
                }
                if b == <$uint>::ZERO {
                    return a;
                }

                let shift = a.trailing_zeros().min(b.trailing_zeros()) as usize;
                a = a.shr_vartime(a.trailing_zeros() as usize);
                b = b.shr_vartime(b.trailing_zeros() as usize);

                loop {
                    if a > b {
                        core::mem::swap(&mut a, &mut b);
                    }
                    b = b.wrapping_sub(&a);
                    if b == <$uint>::ZERO {
                        return a.shl_vartime(shift);
                    }
                    b = b.shr_vartime(b.trailing_zeros() as usize);
                }
            }
        }

        impl From<$uint> for FixedInt<$uint> {
            #[inline]
            fn from(magnitude: $uint) -> Self {
                Self::new(magnitude, false)
            }
        }

        impl PartialOrd for FixedInt<$uint> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for FixedInt<$uint> {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self.negative, other.negative) {
                    (false, false) => self.magnitude.cmp(&other.magnitude),
                    (true, true) => other.magnitude.cmp(&self.magnitude),
                    (false, true) => Ordering::Greater,
                    (true, false) => Ordering::Less,
                }
            }
        }

        impl fmt::Display for FixedInt<$uint> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let base = <$uint>::from_u64(DECIMAL_CHUNK);
                let mut chunks = Vec::new();
                let mut rest = self.magnitude;
                while rest != <$uint>::ZERO {
                    chunks.push(low_u64(&rest.wrapping_rem(&base).to_words()));
                    rest = rest.wrapping_div(&base);
                }

                let mut digits = match chunks.pop() {
                    Some(top) => top.to_string(),
                    None => String::from("0"),
                };
                for chunk in chunks.iter().rev() {
                    digits.push_str(&format!("{:019}", chunk));
                }
                f.pad_integral(!self.negative, "", &digits)
            }
        }

        impl BigInteger for FixedInt<$uint> {
            #[inline]
            fn zero() -> Self {
                Self::new(<$uint>::ZERO, false)
            }

            #[inline]
            fn one() -> Self {
                Self::new(<$uint>::ONE, false)
            }

            #[inline]
            fn from_i64(n: i64) -> Self {
                Self::new(<$uint>::from_u64(n.unsigned_abs()), n < 0)
            }

            fn try_to_i64(&self) -> Option<i64> {
                if self.magnitude.bits() > 64 {
                    return None;
                }
                let word = low_u64(&self.magnitude.to_words());
                if self.negative {
                    if word <= 1u64 << 63 {
                        Some((word as i64).wrapping_neg())
                    } else {
                        None
                    }
                } else {
                    i64::try_from(word).ok()
                }
            }

            #[inline]
            fn sign_i32(&self) -> i32 {
                if self.magnitude == <$uint>::ZERO {
                    0
                } else if self.negative {
                    -1
                } else {
                    1
                }
            }

            #[inline]
            fn negate(&mut self) {
                if self.magnitude != <$uint>::ZERO {
                    self.negative = !self.negative;
                }
            }

            fn add_ref(&self, other: &Self) -> Self {
                if self.negative == other.negative {
                    let sum = self.magnitude.wrapping_add(&other.magnitude);
                    if sum < self.magnitude {
                        overflow();
                    }
                    Self::new(sum, self.negative)
                } else if self.magnitude >= other.magnitude {
                    Self::new(self.magnitude.wrapping_sub(&other.magnitude), self.negative)
                } else {
                    Self::new(other.magnitude.wrapping_sub(&self.magnitude), other.negative)
                }
            }

            #[inline]
            fn sub_ref(&self, other: &Self) -> Self {
                let mut negated = *other;
                negated.negate();
                self.add_ref(&negated)
            }

            #[inline]
            fn mul_ref(&self, other: &Self) -> Self {
                let (lo, hi) = self.magnitude.mul_wide(&other.magnitude);
                if hi != <$uint>::ZERO {
                    overflow();
                }
                Self::new(lo, self.negative ^ other.negative)
            }

            fn div_rem_trunc(&self, divisor: &Self) -> (Self, Self) {
                if divisor.magnitude == <$uint>::ZERO {
                    panic!("division by zero");
                }
                let quotient = self.magnitude.wrapping_div(&divisor.magnitude);
                let remainder = self.magnitude.wrapping_rem(&divisor.magnitude);
                (
                    Self::new(quotient, self.negative ^ divisor.negative),
                    Self::new(remainder, self.negative),
                )
            }

            fn shl_vartime_u32(&self, shift: u32) -> Self {
                if self.magnitude == <$uint>::ZERO {
                    return *self;
                }
                if self.magnitude.bits() as u64 + shift as u64 > $bits {
                    overflow();
                }
                Self::new(self.magnitude.shl_vartime(shift as usize), self.negative)
            }

            fn shr_vartime_u32(&self, shift: u32) -> Self {
                if shift >= $bits {
                    return Self::zero();
                }
                Self::new(self.magnitude.shr_vartime(shift as usize), self.negative)
            }

            #[inline]
            fn bits_u64(&self) -> u64 {
                self.magnitude.bits() as u64
            }

            #[inline]
            fn first_word(&self) -> u64 {
                low_u64(&self.magnitude.to_words())
            }

            #[inline]
            fn ucmp(&self, other: &Self) -> Ordering {
                self.magnitude.cmp(&other.magnitude)
            }

            #[inline]
            fn gcd(a: &Self, b: &Self) -> Self {
                Self::new(Self::gcd_magnitude(a.magnitude, b.magnitude), false)
            }

            fn pow_u32(&self, exponent: u32) -> Self {
                let mut result = Self::one();
                let mut base = *self;
                let mut remaining = exponent;
                while remaining > 0 {
                    if remaining & 1 == 1 {
                        result = result.mul_ref(&base);
                    }
                    remaining >>= 1;
                    // squaring past the last set bit could overflow needlessly
                    if remaining > 0 {
                        base = base.mul_ref(&base);
                    }
                }
                result
            }

            #[inline]
            fn is_valid(&self) -> bool {
                !(self.negative && self.magnitude == <$uint>::ZERO)
            }

            #[inline]
            fn max_bits() -> Option<u64> {
                Some($bits)
            }
        }
    };
}

impl_fixed_integer!(U128, 128);
impl_fixed_integer!(U256, 256);
impl_fixed_integer!(U512, 512);
impl_fixed_integer!(U1024, 1024);
impl_fixed_integer!(U2048, 2048);
impl_fixed_integer!(U4096, 4096);

#[cfg(test)]
mod tests {
    use super::*;

    type I256 = FixedInt<U256>;

    fn int(n: i64) -> I256 {
        I256::from_i64(n)
    }

    #[test]
    fn test_zero_is_never_negative() {
        let z = I256::new(U256::ZERO, true);
        assert!(!z.is_negative());
        assert!(z.is_valid());
        assert_eq!(int(5).sub_ref(&int(5)), I256::zero());
    }

    #[test]
    fn test_signed_arithmetic() {
        assert_eq!(int(7).add_ref(&int(-10)), int(-3));
        assert_eq!(int(-7).add_ref(&int(10)), int(3));
        assert_eq!(int(-7).sub_ref(&int(-10)), int(3));
        assert_eq!(int(-6).mul_ref(&int(-7)), int(42));
        assert_eq!(int(6).mul_ref(&int(-7)), int(-42));
    }

    #[test]
    fn test_truncating_division() {
        assert_eq!(int(-7).div_rem_trunc(&int(2)), (int(-3), int(-1)));
        assert_eq!(int(7).div_rem_trunc(&int(-2)), (int(-3), int(1)));
        assert_eq!(int(6).div_rem_trunc(&int(3)), (int(2), int(0)));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_division_by_zero() {
        let _ = int(1).div_rem_trunc(&int(0));
    }

    #[test]
    fn test_signed_order() {
        let mut values = vec![int(3), int(-5), int(0), int(-1), int(8)];
        values.sort();
        assert_eq!(values, vec![int(-5), int(-1), int(0), int(3), int(8)]);
    }

    #[test]
    fn test_gcd() {
        assert_eq!(I256::gcd(&int(-48), &int(18)), int(6));
        assert_eq!(I256::gcd(&int(0), &int(-9)), int(9));
        assert_eq!(I256::gcd(&int(1 << 20), &int(1 << 12)), int(1 << 12));
        assert_eq!(I256::gcd(&int(999_983), &int(999_979)), int(1));
    }

    #[test]
    fn test_decimal_display() {
        assert_eq!(int(0).to_string(), "0");
        assert_eq!(int(-1234).to_string(), "-1234");
        let big = int(10).pow_u32(40);
        assert_eq!(big.to_string(), format!("1{}", "0".repeat(40)));
        assert_eq!(format!("{:>6}", int(-42)), "   -42");
    }

    #[test]
    fn test_i64_conversion_limits() {
        assert_eq!(int(i64::MIN).try_to_i64(), Some(i64::MIN));
        assert_eq!(int(i64::MAX).try_to_i64(), Some(i64::MAX));
        assert_eq!(int(i64::MAX).add_ref(&int(1)).try_to_i64(), None);
        assert_eq!(int(1).shl_vartime_u32(100).try_to_i64(), None);
    }

    #[test]
    fn test_shifts() {
        assert_eq!(int(-3).shl_vartime_u32(4), int(-48));
        assert_eq!(int(-48).shr_vartime_u32(4), int(-3));
        assert_eq!(int(1).shr_vartime_u32(300), int(0));
        assert_eq!(int(1).shl_vartime_u32(255).bits_u64(), 256);
    }

    #[test]
    #[should_panic(expected = "integer overflow")]
    fn test_shift_overflow_panics() {
        let _ = int(1).shl_vartime_u32(256);
    }

    #[test]
    #[should_panic(expected = "integer overflow")]
    fn test_mul_overflow_panics() {
        let half = int(1).shl_vartime_u32(200);
        let _ = half.mul_ref(&half);
    }

    #[test]
    fn test_pow_at_width_limit() {
        // 2^255 fits even though 2^256 would not
        assert_eq!(int(2).pow_u32(255).bits_u64(), 256);
        assert_eq!(int(-2).pow_u32(3), int(-8));
    }

    #[test]
    fn test_other_widths() {
        let a = FixedInt::<U128>::from_i64(-9);
        assert_eq!(a.mul_ref(&a).to_string(), "81");
        let b = FixedInt::<U4096>::from_i64(3).pow_u32(1000);
        assert_eq!(b.bits_u64(), 1585);
        assert_eq!(FixedInt::<U128>::max_bits(), Some(128));
        assert_eq!(FixedInt::<U4096>::max_bits(), Some(4096));
    }
}
