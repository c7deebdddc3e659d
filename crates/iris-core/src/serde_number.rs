//! Number encoding for the JSON tree format.
//!
//! Integral values are written as JSON integers (`4`, not `4.0`) so that trees
//! compare equal to hand-written fixtures.

use serde::{Deserialize, Deserializer, Serializer};

/// Largest integer an f64 represents exactly.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

fn as_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Some(value as i64)
    } else {
        None
    }
}

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match as_integer(*value) {
        Some(int) => serializer.serialize_i64(int),
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => super::serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        Option::<f64>::deserialize(deserializer)
    }
}
