//! Simulated board: in-memory hardware behind the core's collaborator traits.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tv_control::{StatusView, ValveController};
use tv_core::{
    CycleTimer, DigitalIo, MemoryNv, PinId, ProbeBus, RelayId, SensorAddress, Telemetry,
    Temperature,
};
use tv_registry::ReadEnv;

/// Digital I/O where the valve tracks the relays instantly: energising the
/// open relay asserts the open limit sensor, and so on. Good enough to watch
/// the state machine move.
#[derive(Default)]
pub struct SimIo {
    pins: HashMap<PinId, bool>,
}

impl DigitalIo for SimIo {
    fn set_relay(&mut self, id: RelayId) {
        tracing::info!(?id, "relay set");
        match id {
            RelayId::Valve1 => {
                self.pins.insert(PinId::Valve1Sense, true);
                self.pins.insert(PinId::Valve2Sense, false);
            }
            RelayId::Valve2 => {
                self.pins.insert(PinId::Valve2Sense, true);
                self.pins.insert(PinId::Valve1Sense, false);
            }
        }
    }

    fn reset_relay(&mut self, id: RelayId) {
        tracing::info!(?id, "relay reset");
        match id {
            RelayId::Valve1 => self.pins.insert(PinId::Valve1Sense, false),
            RelayId::Valve2 => self.pins.insert(PinId::Valve2Sense, false),
        };
    }

    fn read_pin(&self, id: PinId) -> bool {
        self.pins.get(&id).copied().unwrap_or(false)
    }
}

/// A bus where every configured probe sits in the same simulated bath.
#[derive(Default)]
pub struct SimProbes {
    pub ambient: Option<Temperature>,
}

impl ProbeBus for SimProbes {
    fn read_temperature(&mut self, _addr: SensorAddress) -> Option<Temperature> {
        self.ambient
    }
}

/// Countdown that loses one tick per control cycle.
#[derive(Default)]
pub struct SimTimer {
    ticks: u16,
}

impl SimTimer {
    pub fn tick(&mut self) {
        self.ticks = self.ticks.saturating_sub(1);
    }
}

impl CycleTimer for SimTimer {
    fn load(&mut self, ticks: u16) {
        self.ticks = ticks;
    }
    fn remaining(&self) -> u16 {
        self.ticks
    }
}

/// The whole simulated device, with its NV image persisted to a flat file.
pub struct SimBoard {
    pub nv: MemoryNv,
    pub io: SimIo,
    pub probes: SimProbes,
    pub timer: SimTimer,
    pub telemetry: Telemetry,
    pub controller: ValveController,
    nv_path: Option<PathBuf>,
}

impl SimBoard {
    /// Board with no backing file; NV state lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            nv: MemoryNv::new(),
            io: SimIo::default(),
            probes: SimProbes::default(),
            timer: SimTimer::default(),
            telemetry: Telemetry::new(),
            controller: ValveController::new(),
            nv_path: None,
        }
    }

    /// Load the NV image from `path`, starting erased when it doesn't exist.
    pub fn load(path: &Path) -> io::Result<Self> {
        let nv = match std::fs::read(path) {
            Ok(image) => MemoryNv::from_image(image),
            Err(e) if e.kind() == io::ErrorKind::NotFound => MemoryNv::new(),
            Err(e) => return Err(e),
        };
        let mut board = Self::in_memory();
        board.nv = nv;
        board.nv_path = Some(path.to_path_buf());
        Ok(board)
    }

    /// Persist the NV image.
    pub fn save(&self) -> io::Result<()> {
        match &self.nv_path {
            Some(path) => std::fs::write(path, self.nv.image()),
            None => Ok(()),
        }
    }

    /// Run register reads against the live board.
    pub fn with_env<R>(&self, f: impl FnOnce(&ReadEnv<'_>) -> R) -> R {
        let view = StatusView {
            controller: &self.controller,
            nv: &self.nv,
            io: &self.io,
        };
        let env = ReadEnv {
            nv: &self.nv,
            io: &self.io,
            telemetry: &self.telemetry,
            valve: &view,
        };
        f(&env)
    }

    /// Advance the simulation by one control cycle.
    pub fn cycle(&mut self, bath: Option<f64>) -> tv_control::ControlResult<()> {
        self.probes.ambient = match bath {
            Some(deg) => Temperature::from_celsius(deg).ok(),
            None => None,
        };
        self.timer.tick();
        let mut cx = tv_control::Cycle {
            nv: &self.nv,
            probes: &mut self.probes,
            io: &mut self.io,
            timer: &mut self.timer,
            telemetry: &mut self.telemetry,
        };
        self.controller.run_cycle(&mut cx)
    }
}
