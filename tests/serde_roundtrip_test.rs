//! JSON round trips through the `serde` feature.

use exact_ratio::{BigRational, RationalI1024};
use num_bigint::BigInt;

#[test]
fn test_serializes_as_canonical_string() {
    let r = BigRational::from_i64(6, -8);
    assert_eq!(serde_json::to_string(&r).unwrap(), "\"-3/4\"");
    assert_eq!(serde_json::to_string(&BigRational::from_i64(10, 2)).unwrap(), "\"5\"");
}

#[test]
fn test_round_trip_preserves_value() {
    let values = vec![
        BigRational::zero(),
        BigRational::from_i64(-7, 2),
        BigRational::new(BigInt::from(3).pow(90), BigInt::from(2).pow(70)),
        BigRational::from_f64(0.1).unwrap(),
    ];
    let json = serde_json::to_string(&values).unwrap();
    let back: Vec<BigRational> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, values);
}

#[test]
fn test_deserialize_accepts_decimal_and_reduces() {
    let r: BigRational = serde_json::from_str("\"12/8\"").unwrap();
    assert_eq!(r, BigRational::from_i64(3, 2));
    let d: BigRational = serde_json::from_str("\"-0.125\"").unwrap();
    assert_eq!(d, BigRational::from_i64(-1, 8));
}

#[test]
fn test_deserialize_rejects_bad_input() {
    let err = serde_json::from_str::<BigRational>("\"1/0\"").unwrap_err();
    assert!(err.to_string().contains("zero denominator"));

    let err = serde_json::from_str::<BigRational>("\"1/2x\"").unwrap_err();
    assert!(err.to_string().contains("unexpected character"));

    assert!(serde_json::from_str::<BigRational>("1.5").is_err());
}

#[test]
fn test_fixed_backend_round_trip() {
    let r = RationalI1024::from_i64(i64::MIN + 1, 3);
    let json = serde_json::to_string(&r).unwrap();
    let back: RationalI1024 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}
