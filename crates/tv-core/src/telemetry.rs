//! Consolidated live RAM state.
//!
//! One owned value replaces the original firmware's module-level globals:
//! the control cycle holds `&mut Telemetry` while it runs, and register
//! readers see a consistent `&Telemetry` between cycles. The error counters
//! are atomics because fault producers may run on an interrupt/async path.

use crate::alarm::Alarms;
use crate::counter::{ErrorCounter, ErrorCounters};
use crate::temperature::Temperature;
use serde::{Deserialize, Serialize};

/// Identifies one of the four temperature probes. `T0` is the control probe;
/// `T1`..`T3` are monitoring-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeId {
    T0,
    T1,
    T2,
    T3,
}

impl ProbeId {
    pub const ALL: [ProbeId; 4] = [ProbeId::T0, ProbeId::T1, ProbeId::T2, ProbeId::T3];

    pub const fn index(self) -> usize {
        match self {
            ProbeId::T0 => 0,
            ProbeId::T1 => 1,
            ProbeId::T2 => 2,
            ProbeId::T3 => 3,
        }
    }
}

/// Identifies one of the one-wire fault counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterId {
    Missing,
    Shorted,
    Crc,
    Power,
}

/// Live state shared between the control cycle and the register directory.
#[derive(Debug, Default)]
pub struct Telemetry {
    /// Latest probe readings, `None` when a probe is absent or faulted.
    pub probes: [Option<Temperature>; 4],
    /// Current alarm bitset.
    pub alarms: Alarms,
    /// One-wire fault counters.
    pub counters: ErrorCounters,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, id: ProbeId) -> Option<Temperature> {
        self.probes[id.index()]
    }

    pub fn set_probe(&mut self, id: ProbeId, reading: Option<Temperature>) {
        self.probes[id.index()] = reading;
    }

    pub fn counter(&self, id: CounterId) -> &ErrorCounter {
        match id {
            CounterId::Missing => &self.counters.missing,
            CounterId::Shorted => &self.counters.shorted,
            CounterId::Crc => &self.counters.crc,
            CounterId::Power => &self.counters.power,
        }
    }
}
