//! Fixed-point temperature readings.
//!
//! Probe hardware reports in multiples of 1/16 degree; calibration and
//! interpolation happen upstream, so the natural firmware datatype is a
//! ten-thousandth of a degree in an `i32`. A probe with no valid reading is
//! `Option::<Temperature>::None` everywhere in this codebase; no in-band
//! sentinel value crosses an API boundary.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-point scale: units per degree Celsius.
pub const SCALE: i32 = 10_000;

/// A temperature in 1/10000 °C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(i32);

impl Temperature {
    /// Construct from raw fixed-point units (1/10000 °C).
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw fixed-point value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert from degrees Celsius, rejecting values that do not fit.
    pub fn from_celsius(deg: f64) -> Result<Self, CoreError> {
        if !deg.is_finite() {
            return Err(CoreError::BadTemperature {
                what: "value is not finite",
            });
        }
        let scaled = deg * SCALE as f64;
        if scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
            return Err(CoreError::BadTemperature {
                what: "value out of range",
            });
        }
        Ok(Self(scaled as i32))
    }

    /// Value in degrees Celsius.
    pub fn to_celsius(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Little-endian storage form used by the non-volatile layout.
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Decode from the non-volatile storage form.
    pub const fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self(i32::from_le_bytes(bytes))
    }
}

impl fmt::Display for Temperature {
    /// One fractional digit, the register text protocol's rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.to_celsius())
    }
}

impl FromStr for Temperature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let deg: f64 = s.trim().parse().map_err(|_| CoreError::BadTemperature {
            what: "not a number",
        })?;
        Self::from_celsius(deg)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn parse_of_display_is_within_half_tenth(raw in -2_000_000i32..2_000_000i32) {
            let t = Temperature::from_raw(raw);
            let back: Temperature = t.to_string().parse().unwrap();
            // Display keeps one fractional digit, so a round trip may lose
            // up to half a tenth of a degree.
            prop_assert!((back.raw() - raw).abs() <= SCALE / 20 + 1);
        }
    }
}
