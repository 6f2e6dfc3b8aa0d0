//! Serde support, enabled with the `serde` feature.
//!
//! A rational serializes as its canonical text form (`"-7/2"`) so that values
//! wider than any native integer survive formats like JSON unchanged.

use core::fmt;
use core::marker::PhantomData;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::integer::BigInteger;
use crate::Rational;

impl<T: BigInteger> Serialize for Rational<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct RationalVisitor<T>(PhantomData<T>);

impl<'de, T: BigInteger> Visitor<'de> for RationalVisitor<T> {
    type Value = Rational<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a rational literal such as \"-7/2\" or \"1.25\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}

impl<'de, T: BigInteger> Deserialize<'de> for Rational<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RationalVisitor(PhantomData))
    }
}
