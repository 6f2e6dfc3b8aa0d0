//! Text formatting and parsing.
//!
//! Output is `"<numer>"` for integers and `"<numer>/<denom>"` otherwise.
//! Input additionally accepts decimal notation (`"-1.25"`).

use core::fmt;
use core::iter::Peekable;
use core::str::FromStr;

use crate::error::RationalError;
use crate::integer::BigInteger;
use crate::Rational;

impl<T: BigInteger> fmt::Display for Rational<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == T::one() {
            f.pad(&self.numer.to_string())
        } else {
            f.pad(&format!("{}/{}", self.numer, self.denom))
        }
    }
}

/// Raw result of scanning a literal, before normalization.
struct Scanned<T> {
    numer: T,
    denom: T,
    digits: usize,
}

/// Fold a run of decimal digits into `acc`, optionally scaling `scale` by ten
/// for each digit.
fn scan_digits<T, I>(input: &mut Peekable<I>, acc: &mut T, mut scale: Option<&mut T>) -> usize
where
    T: BigInteger,
    I: Iterator<Item = char>,
{
    let ten = T::from_i64(10);
    let mut count = 0;
    while let Some(c) = input.next_if(char::is_ascii_digit) {
        let digit = T::from_i64(i64::from(c as u8 - b'0'));
        *acc = acc.mul_ref(&ten).add_ref(&digit);
        if let Some(scale) = scale.as_deref_mut() {
            *scale = scale.mul_ref(&ten);
        }
        count += 1;
    }
    count
}

fn scan<T, I>(input: &mut Peekable<I>) -> Scanned<T>
where
    T: BigInteger,
    I: Iterator<Item = char>,
{
    while input.next_if(|c| c.is_whitespace()).is_some() {}

    let negative = input.next_if_eq(&'-').is_some();

    let mut numer = T::zero();
    let mut denom = T::one();
    let mut digits = scan_digits(input, &mut numer, None);

    if input.next_if_eq(&'/').is_some() {
        // a bare "/" leaves the denominator at zero
        denom = T::zero();
        digits += scan_digits(input, &mut denom, None);
    } else if input.next_if_eq(&'.').is_some() {
        digits += scan_digits(input, &mut numer, Some(&mut denom));
    }

    if negative {
        numer.negate();
    }
    tracing::trace!(%numer, %denom, digits, "scanned rational literal");
    Scanned {
        numer,
        denom,
        digits,
    }
}

impl<T: BigInteger> Rational<T> {
    /// Read a rational from the front of a character stream.
    ///
    /// Skips leading whitespace, then accepts an optional `-`, a run of
    /// digits, and either `/` plus denominator digits or `.` plus fraction
    /// digits. The first character that does not fit is left in the stream.
    /// Missing digits count as zero.
    ///
    /// # Panics
    ///
    /// Panics with `zero denominator` when the denominator reads as zero, as
    /// in `"3/"` or `"3/0"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use exact_ratio::BigRational;
    ///
    /// let mut input = "  -7/2, 1.25".chars().peekable();
    /// let first = BigRational::read_from(&mut input);
    /// assert_eq!(first, BigRational::from_i64(-7, 2));
    /// assert_eq!(input.next(), Some(','));
    ///
    /// let second = BigRational::read_from(&mut input);
    /// assert_eq!(second, BigRational::from_i64(5, 4));
    /// ```
    #[track_caller]
    pub fn read_from<I>(input: &mut Peekable<I>) -> Self
    where
        I: Iterator<Item = char>,
    {
        let scanned = scan::<T, I>(input);
        Self::new(scanned.numer, scanned.denom)
    }
}

/// Strict parse of a whole string.
///
/// Unlike [`Rational::read_from`], every failure is reported as an error:
/// text without any digit, trailing characters, and zero denominators.
impl<T: BigInteger> FromStr for Rational<T> {
    type Err = RationalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input = s.chars().peekable();
        let scanned = scan::<T, _>(&mut input);
        let rest: String = input.collect();

        if let Some(found) = rest.chars().next() {
            return Err(RationalError::UnexpectedCharacter {
                found,
                offset: s.len() - rest.len(),
            });
        }
        if scanned.digits == 0 {
            return Err(RationalError::NoDigits);
        }
        Self::try_new(scanned.numer, scanned.denom)
    }
}
