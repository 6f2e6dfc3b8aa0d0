//! Arithmetic operators for `Rational<T>`.
//!
//! The compound assignments carry the actual algorithms. `self` is both the
//! destination and the left operand, and the right operand is frequently a
//! copy of `self`, so each implementation reads every field it needs before
//! overwriting any of them. All four finish with a full normalization.
//!
//! The binary operators for every owned/borrowed combination forward to the
//! compound assignments.

use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::integer::BigInteger;
use crate::Rational;

impl<T: BigInteger> AddAssign<&Rational<T>> for Rational<T> {
    fn add_assign(&mut self, other: &Rational<T>) {
        let cross = other.numer.mul_ref(&self.denom);
        self.numer = self.numer.mul_ref(&other.denom).add_ref(&cross);
        self.denom = self.denom.mul_ref(&other.denom);
        self.normalize();
    }
}

impl<T: BigInteger> SubAssign<&Rational<T>> for Rational<T> {
    fn sub_assign(&mut self, other: &Rational<T>) {
        let cross = other.numer.mul_ref(&self.denom);
        self.numer = self.numer.mul_ref(&other.denom).sub_ref(&cross);
        self.denom = self.denom.mul_ref(&other.denom);
        self.normalize();
    }
}

impl<T: BigInteger> MulAssign<&Rational<T>> for Rational<T> {
    fn mul_assign(&mut self, other: &Rational<T>) {
        self.numer = self.numer.mul_ref(&other.numer);
        self.denom = self.denom.mul_ref(&other.denom);
        self.normalize();
    }
}

/// Division by a zero value leaves a zero denominator, which normalization
/// rejects with a `zero denominator` panic.
impl<T: BigInteger> DivAssign<&Rational<T>> for Rational<T> {
    fn div_assign(&mut self, other: &Rational<T>) {
        let numer = self.numer.mul_ref(&other.denom);
        self.denom = self.denom.mul_ref(&other.numer);
        self.numer = numer;
        self.normalize();
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident) => {
        impl<T: BigInteger> $assign_imp<Rational<T>> for Rational<T> {
            #[inline]
            fn $assign_method(&mut self, other: Rational<T>) {
                self.$assign_method(&other);
            }
        }

        impl<T: BigInteger> $imp<&Rational<T>> for &Rational<T> {
            type Output = Rational<T>;

            #[inline]
            fn $method(self, other: &Rational<T>) -> Rational<T> {
                let mut r = self.clone();
                r.$assign_method(other);
                r
            }
        }

        impl<T: BigInteger> $imp<Rational<T>> for &Rational<T> {
            type Output = Rational<T>;

            #[inline]
            fn $method(self, other: Rational<T>) -> Rational<T> {
                let mut r = self.clone();
                r.$assign_method(&other);
                r
            }
        }

        impl<T: BigInteger> $imp<&Rational<T>> for Rational<T> {
            type Output = Rational<T>;

            #[inline]
            fn $method(mut self, other: &Rational<T>) -> Rational<T> {
                self.$assign_method(other);
                self
            }
        }

        impl<T: BigInteger> $imp<Rational<T>> for Rational<T> {
            type Output = Rational<T>;

            #[inline]
            fn $method(mut self, other: Rational<T>) -> Rational<T> {
                self.$assign_method(&other);
                self
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

impl<T: BigInteger> Neg for Rational<T> {
    type Output = Rational<T>;

    #[inline]
    fn neg(mut self) -> Rational<T> {
        self.negate();
        self
    }
}

impl<T: BigInteger> Neg for &Rational<T> {
    type Output = Rational<T>;

    #[inline]
    fn neg(self) -> Rational<T> {
        -self.clone()
    }
}

impl<T: BigInteger> Sum for Rational<T> {
    fn sum<I: Iterator<Item = Rational<T>>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |mut acc, x| {
            acc += &x;
            acc
        })
    }
}

impl<'a, T: BigInteger> Sum<&'a Rational<T>> for Rational<T> {
    fn sum<I: Iterator<Item = &'a Rational<T>>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl<T: BigInteger> Product for Rational<T> {
    fn product<I: Iterator<Item = Rational<T>>>(iter: I) -> Self {
        iter.fold(Rational::one(), |mut acc, x| {
            acc *= &x;
            acc
        })
    }
}

impl<'a, T: BigInteger> Product<&'a Rational<T>> for Rational<T> {
    fn product<I: Iterator<Item = &'a Rational<T>>>(iter: I) -> Self {
        iter.fold(Rational::one(), |mut acc, x| {
            acc *= x;
            acc
        })
    }
}
