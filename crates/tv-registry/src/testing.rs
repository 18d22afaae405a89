//! Shared test fixtures for registry tests.

use crate::codec::ReadEnv;
use std::collections::HashMap;
use tv_core::{DigitalIo, MemoryNv, PinId, RelayId, Telemetry, ValveState, ValveStatusSource};

/// Digital I/O stub with settable pins; relay calls are ignored.
#[derive(Default)]
pub struct TestIo {
    pub pins: HashMap<PinId, bool>,
}

impl DigitalIo for TestIo {
    fn set_relay(&mut self, _id: RelayId) {}
    fn reset_relay(&mut self, _id: RelayId) {}
    fn read_pin(&self, id: PinId) -> bool {
        self.pins.get(&id).copied().unwrap_or(false)
    }
}

/// Reports a fixed valve status.
pub struct FixedStatus(pub ValveState);

impl ValveStatusSource for FixedStatus {
    fn valve_state(&self) -> ValveState {
        self.0
    }
}

/// A complete board for register tests.
pub struct TestBoard {
    pub nv: MemoryNv,
    pub io: TestIo,
    pub telemetry: Telemetry,
    pub status: FixedStatus,
}

impl TestBoard {
    pub fn new() -> Self {
        Self {
            nv: MemoryNv::new(),
            io: TestIo::default(),
            telemetry: Telemetry::new(),
            status: FixedStatus(ValveState::Closed),
        }
    }

    pub fn env(&self) -> ReadEnv<'_> {
        ReadEnv {
            nv: &self.nv,
            io: &self.io,
            telemetry: &self.telemetry,
            valve: &self.status,
        }
    }
}
