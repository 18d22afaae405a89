//! One-wire sensor ROM addresses.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-byte one-wire ROM address (family code, 6-byte serial, CRC).
///
/// The canonical text form is 16 hex digits with no separators, matching the
/// probe `t*/id` registers and the bus scanner's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SensorAddress(pub [u8; 8]);

impl SensorAddress {
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }

    /// An erased non-volatile block reads back as all ones; no real device
    /// has that ROM, so it doubles as "no probe configured".
    pub fn is_unset(&self) -> bool {
        self.0.iter().all(|&b| b == 0xFF)
    }
}

impl fmt::Display for SensorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

impl FromStr for SensorAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::BadAddress);
        }
        let mut bytes = [0u8; 8];
        for (i, out) in bytes.iter_mut().enumerate() {
            *out = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| CoreError::BadAddress)?;
        }
        Ok(Self(bytes))
    }
}
