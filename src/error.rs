//! Recoverable errors of the fallible constructors and parsers.
//!
//! The panicking entry points (`Rational::new`, division, `read_from`) treat a
//! zero denominator as a fatal invariant violation instead.

/// Error returned by `try_new`, `FromStr` and the `TryFrom<f64>` conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RationalError {
    #[error("zero denominator")]
    ZeroDenominator,

    #[error("no digits in rational literal")]
    NoDigits,

    #[error("unexpected character {found:?} at byte offset {offset}")]
    UnexpectedCharacter { found: char, offset: usize },

    #[error("{0} is not a finite number")]
    NonFinite(String),

    #[error("{0} does not fit the integer type")]
    OutOfRange(String),
}
