//! Strength Classes
//!
//! Property class notation `x.y` (e.g. "8.8", "10.9") decoded to yield and
//! ultimate tensile strength by fixed arithmetic:
//!
//! - Re = x · y · 10 (MPa)
//! - Rm = y · 100 (MPa)
//!
//! This is a simplified reading of the ISO 898-1 notation and is kept as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BoltError, BoltResult};

/// A parsed strength class `first.second`.
///
/// Serializes as its `"x.y"` string and is re-validated on deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrengthClass {
    pub first: u32,
    pub second: u32,
}

impl StrengthClass {
    /// Yield strength Re (MPa)
    pub fn yield_strength_mpa(&self) -> u32 {
        self.first * self.second * 10
    }

    /// Ultimate tensile strength Rm (MPa)
    pub fn tensile_strength_mpa(&self) -> u32 {
        self.second * 100
    }
}

impl FromStr for StrengthClass {
    type Err = BoltError;

    fn from_str(s: &str) -> BoltResult<Self> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() != 2 {
            return Err(BoltError::invalid_strength_class(
                s,
                format!("expected '<int>.<int>', found {} segment(s)", segments.len()),
            ));
        }

        let parse = |seg: &str| -> BoltResult<u32> {
            seg.trim().parse::<u32>().map_err(|_| {
                BoltError::invalid_strength_class(s, format!("'{}' is not an integer", seg))
            })
        };

        let class = StrengthClass {
            first: parse(segments[0])?,
            second: parse(segments[1])?,
        };

        let in_range = class
            .first
            .checked_mul(class.second)
            .and_then(|v| v.checked_mul(10))
            .and(class.second.checked_mul(100));
        if in_range.is_none() {
            return Err(BoltError::invalid_strength_class(s, "value out of range"));
        }

        Ok(class)
    }
}

impl fmt::Display for StrengthClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.first, self.second)
    }
}

impl TryFrom<String> for StrengthClass {
    type Error = BoltError;

    fn try_from(s: String) -> BoltResult<Self> {
        s.parse()
    }
}

impl From<StrengthClass> for String {
    fn from(class: StrengthClass) -> Self {
        class.to_string()
    }
}

/// Decode a strength class string to `(Re, Rm)` in MPa.
pub fn decode_strength_class(klasa: &str) -> BoltResult<(u32, u32)> {
    let class: StrengthClass = klasa.parse()?;
    Ok((class.yield_strength_mpa(), class.tensile_strength_mpa()))
}
