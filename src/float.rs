//! Conversions between `Rational<T>` and native floating point.
//!
//! Importing is exact: a double is a dyadic fraction, and [`Rational::from_f64`]
//! reproduces that fraction bit for bit. Exporting rounds to nearest with ties
//! to even, with gradual underflow and overflow to infinity, so
//! `from_f64(x)?.to_f64() == x` for every finite `x`.

use core::cmp::Ordering;

use crate::error::RationalError;
use crate::integer::BigInteger;
use crate::Rational;

/// Bits of mantissa extracted per step.
const FLOAT_CHUNK_BITS: u32 = 15;

/// `2^FLOAT_CHUNK_BITS`.
const FLOAT_CHUNK_SCALE: f64 = 32768.0;

/// Upper bound on extraction steps (300 bits), far beyond the 53 a double holds.
const FLOAT_MAX_CHUNKS: usize = 20;

/// Split a positive finite `x` into a mantissa in `[0.5, 1)` and an exponent
/// with `x == mantissa * 2^exponent`.
fn frexp(x: f64) -> (f64, i64) {
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    if biased == 0 {
        // subnormal: scale into the normal range first
        let (mantissa, exponent) = frexp(x * 18014398509481984.0); // 2^54
        return (mantissa, exponent - 54);
    }
    let mantissa = f64::from_bits((bits & !(0x7ff << 52)) | (1022 << 52));
    (mantissa, biased - 1022)
}

/// Layout of a binary interchange format.
struct BinaryFormat {
    /// Significand bits including the implicit one.
    precision: i64,
    /// Exponent of the smallest normal value.
    min_exp: i64,
    /// Exponent of the largest finite value.
    max_exp: i64,
}

const BINARY64: BinaryFormat = BinaryFormat {
    precision: 53,
    min_exp: -1022,
    max_exp: 1023,
};

const BINARY32: BinaryFormat = BinaryFormat {
    precision: 24,
    min_exp: -126,
    max_exp: 127,
};

/// Magnitude rounded to a format: `mantissa * 2^exp2`.
enum Rounded {
    Zero,
    Finite { mantissa: u64, exp2: i64 },
    Overflow,
}

impl<T: BigInteger> Rational<T> {
    /// Convert an f64 to the exact rational it stores.
    ///
    /// Returns `None` if the input is infinite or NaN, or if the exact value
    /// needs more bits than a fixed-width `T` holds (for example `1e-30`
    /// on a 128-bit backend).
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    ///
    /// let r = BigRational::from_f64(0.75).unwrap();
    /// assert_eq!(r, BigRational::from_i64(3, 4));
    ///
    /// let tenth = BigRational::from_f64(0.1).unwrap();
    /// assert_eq!(tenth.to_string(), "3602879701896397/36028797018963968");
    /// ```
    pub fn from_f64(x: f64) -> Option<Self> {
        if !x.is_finite() {
            return None;
        }
        if x == 0.0 {
            return Some(Self::zero());
        }

        let negative = x < 0.0;
        let (mut mantissa, mut exponent) = frexp(x.abs());
        let mut numer = T::zero();
        let mut chunks = 0;
        while mantissa != 0.0 && chunks < FLOAT_MAX_CHUNKS {
            let scaled = mantissa * FLOAT_CHUNK_SCALE;
            let chunk = scaled.trunc();
            mantissa = scaled - chunk;
            numer = numer
                .shl_vartime_u32(FLOAT_CHUNK_BITS)
                .add_ref(&T::from_i64(chunk as i64));
            exponent -= i64::from(FLOAT_CHUNK_BITS);
            chunks += 1;
        }
        tracing::trace!(value = x, chunks, exponent, "decomposed float");

        // strip the zero bits the last chunk padded in
        while exponent < 0 && numer.first_word() & 1 == 0 {
            numer = numer.shr_vartime_u32(1);
            exponent += 1;
        }

        if let Some(width) = T::max_bits() {
            let needed = if exponent >= 0 {
                numer.bits_u64() + exponent as u64
            } else {
                exponent.unsigned_abs() + 1
            };
            if needed > width {
                tracing::debug!(value = x, needed, width, "float does not fit integer width");
                return None;
            }
        }

        let mut denom = T::one();
        match exponent.cmp(&0) {
            Ordering::Greater => numer = numer.shl_vartime_u32(exponent as u32),
            Ordering::Less => denom = denom.shl_vartime_u32(exponent.unsigned_abs() as u32),
            Ordering::Equal => {}
        }
        if negative {
            numer.negate();
        }
        Some(Self::new(numer, denom))
    }

    /// Convert an f32 to the exact rational it stores.
    ///
    /// Returns `None` under the same conditions as [`Rational::from_f64`].
    #[inline]
    pub fn from_f32(x: f32) -> Option<Self> {
        Self::from_f64(f64::from(x))
    }

    /// Nearest `f64`, ties to even.
    ///
    /// Values beyond the finite range become infinities; values too small
    /// for the smallest subnormal become zero. Never panics, whatever the
    /// integer backend.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    ///
    /// assert_eq!(BigRational::from_i64(1, 3).to_f64(), 1.0 / 3.0);
    /// assert_eq!(BigRational::from_i64(-5, 2).to_f64(), -2.5);
    /// ```
    pub fn to_f64(&self) -> f64 {
        let magnitude = match self.round_to_format(&BINARY64) {
            Rounded::Zero => 0.0,
            Rounded::Overflow => f64::INFINITY,
            Rounded::Finite { mantissa, exp2 } => mantissa as f64 * pow2_f64(exp2),
        };
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Nearest `f32`, ties to even. Rounds directly, not through `f64`.
    pub fn to_f32(&self) -> f32 {
        let magnitude = match self.round_to_format(&BINARY32) {
            Rounded::Zero => 0.0,
            Rounded::Overflow => f32::INFINITY,
            Rounded::Finite { mantissa, exp2 } => mantissa as f32 * pow2_f32(exp2),
        };
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Check whether the value lies within `-f32::MAX..=f32::MAX`.
    ///
    /// Advisory only: the value may still lose precision when narrowed.
    /// Negative values and values closer to zero than `f32::MIN_POSITIVE`
    /// count as fitting; they convert to negative numbers, subnormals or
    /// zero.
    #[inline]
    pub fn fits_in_f32(&self) -> bool {
        self.fits_within(&BINARY32)
    }

    /// Check whether the value lies within `-f64::MAX..=f64::MAX`.
    ///
    /// Same conventions as [`Rational::fits_in_f32`].
    #[inline]
    pub fn fits_in_f64(&self) -> bool {
        self.fits_within(&BINARY64)
    }

    /// `|self| <= MAX` of the format, decided from the leading bits alone.
    fn fits_within(&self, format: &BinaryFormat) -> bool {
        if self.is_zero() {
            return true;
        }
        let (top, exponent, inexact) = self.leading_bits(format.precision as u32);
        match exponent.cmp(&format.max_exp) {
            Ordering::Less => true,
            Ordering::Greater => false,
            // MAX has an all-ones significand; anything beyond it is inexact
            Ordering::Equal => !(inexact && top == (1u64 << format.precision) - 1),
        }
    }

    /// The first `count` bits of `|self|` (`count <= 64`).
    ///
    /// Returns `(top, exponent, inexact)` with `top` holding exactly `count`
    /// significant bits, `exponent == floor(log2 |self|)` and
    /// `|self| == (top + f) * 2^(exponent - count + 1)` for some `0 <= f < 1`,
    /// `inexact` telling whether `f != 0`. Intermediate values never grow past
    /// the bit length of the denominator or `T::max_bits()`.
    ///
    /// `self` must be non-zero.
    fn leading_bits(&self, count: u32) -> (u64, i64, bool) {
        let count = i64::from(count);
        let mut numer = self.numer.clone();
        if numer.sign_i32() < 0 {
            numer.negate();
        }

        let (whole, mut rem) = numer.div_rem_trunc(&self.denom);
        let whole_bits = whole.bits_u64() as i64;
        if whole_bits >= count {
            let dropped = (whole_bits - count) as u32;
            let top = whole.shr_vartime_u32(dropped);
            let inexact = !rem.is_zero_bool() || top.shl_vartime_u32(dropped) != whole;
            return (top.first_word(), whole_bits - 1, inexact);
        }

        // long division for the fraction bits
        let denom_bits = self.denom.bits_u64() as i64;
        let mut top = whole.first_word();
        let mut top_bits = whole_bits;
        let mut fraction_bits = 0i64;
        while top_bits < count && !rem.is_zero_bool() {
            let room = denom_bits - rem.bits_u64() as i64;
            if top == 0 && room > 1 {
                // rem * 2^(room - 1) is still below denom: those bits are zero
                rem = rem.shl_vartime_u32((room - 1) as u32);
                fraction_bits += room - 1;
                continue;
            }

            let available = match T::max_bits() {
                Some(width) => width as i64 - rem.bits_u64() as i64,
                None => count,
            };
            let step = (count - top_bits).min(available);
            if step > 0 {
                let shifted = rem.shl_vartime_u32(step as u32);
                let (digits, r) = shifted.div_rem_trunc(&self.denom);
                rem = r;
                top = (top << step) | digits.first_word();
                fraction_bits += step;
            } else {
                // rem fills the whole width: compare against denom - rem
                // instead of doubling
                let complement = self.denom.sub_ref(&rem);
                let bit = rem.ucmp(&complement) != Ordering::Less;
                rem = if bit {
                    rem.sub_ref(&complement)
                } else {
                    rem.add_ref(&rem)
                };
                top = (top << 1) | u64::from(bit);
                fraction_bits += 1;
            }
            top_bits = 64 - i64::from(top.leading_zeros());
        }

        if top_bits < count {
            let pad = count - top_bits;
            top <<= pad;
            fraction_bits += pad;
        }
        (top, count - 1 - fraction_bits, !rem.is_zero_bool())
    }

    fn round_to_format(&self, format: &BinaryFormat) -> Rounded {
        if self.is_zero() {
            return Rounded::Zero;
        }

        // two bits beyond the significand: one to round on, one spare
        let count = format.precision + 2;
        let (top, exponent, inexact) = self.leading_bits(count as u32);
        if exponent > format.max_exp {
            return Rounded::Overflow;
        }

        let kept = if exponent >= format.min_exp {
            format.precision
        } else {
            exponent - format.min_exp + format.precision
        };
        if kept < 0 {
            return Rounded::Zero;
        }

        let dropped = count - kept;
        let mut mantissa = top >> dropped;
        let half = 1u64 << (dropped - 1);
        let low = top & ((half << 1) - 1);
        let round_up = match low.cmp(&half) {
            Ordering::Greater => true,
            Ordering::Equal => inexact || mantissa & 1 == 1,
            Ordering::Less => false,
        };
        if round_up {
            mantissa += 1;
        }

        Rounded::Finite {
            mantissa,
            exp2: exponent - kept + 1,
        }
    }
}

/// `2^k` for `k` in the range of finite doubles, subnormals included.
fn pow2_f64(k: i64) -> f64 {
    if k >= -1022 {
        f64::from_bits(((k + 1023) as u64) << 52)
    } else {
        f64::from_bits(1u64 << (k + 1074))
    }
}

fn pow2_f32(k: i64) -> f32 {
    if k >= -126 {
        f32::from_bits(((k + 127) as u32) << 23)
    } else {
        f32::from_bits(1u32 << (k + 149))
    }
}

impl<T: BigInteger> TryFrom<f64> for Rational<T> {
    type Error = RationalError;

    fn try_from(x: f64) -> Result<Self, Self::Error> {
        match Self::from_f64(x) {
            Some(r) => Ok(r),
            None if x.is_finite() => Err(RationalError::OutOfRange(x.to_string())),
            None => Err(RationalError::NonFinite(x.to_string())),
        }
    }
}

impl<T: BigInteger> TryFrom<f32> for Rational<T> {
    type Error = RationalError;

    fn try_from(x: f32) -> Result<Self, Self::Error> {
        match Self::from_f32(x) {
            Some(r) => Ok(r),
            None if x.is_finite() => Err(RationalError::OutOfRange(x.to_string())),
            None => Err(RationalError::NonFinite(x.to_string())),
        }
    }
}
