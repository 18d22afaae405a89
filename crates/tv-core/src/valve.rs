//! Valve wiring topology and externally observable status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical wiring mode, selected by the `vtype` configuration byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValveTopology {
    /// Single relay driving a spring-return valve; one limit sensor.
    SpringReturn,
    /// Dual-relay ball valve, no position sensors.
    BallNoSensors,
    /// Dual-relay ball valve with open and closed limit sensors.
    BallWithSensors,
    /// Unrecognised configuration byte; nothing is driven, status is Error.
    Unknown(u8),
}

impl ValveTopology {
    /// Decode the configuration byte. An erased byte (0xFF) selects the
    /// spring-return default, so a fresh board behaves sanely.
    pub fn from_config(byte: u8) -> Self {
        match byte {
            0 | 0xFF => Self::SpringReturn,
            1 => Self::BallNoSensors,
            2 => Self::BallWithSensors,
            other => Self::Unknown(other),
        }
    }
}

/// Derived, human-readable valve status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValveState {
    Closed,
    Opening,
    Open,
    Closing,
    Error,
}

impl fmt::Display for ValveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Closed => "Closed",
            Self::Opening => "Opening",
            Self::Open => "Open",
            Self::Closing => "Closing",
            Self::Error => "Error",
        };
        f.write_str(s)
    }
}
