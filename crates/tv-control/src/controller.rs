//! The control-cycle state machine.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use tv_core::{
    Alarms, CycleTimer, DigitalIo, NonVolatile, PinId, ProbeBus, ProbeId, RelayId, SensorAddress,
    Telemetry, Temperature, ValveState, ValveStatusSource, ValveTopology,
};
use tv_registry::{directory, Register};

/// Process-lifetime control state. Initialised closed/off at startup and
/// mutated once per cycle.
///
/// `desired_open` and `drive_open` are separate so the jog code can force the
/// valve to move without disturbing the hysteresis state when the reading
/// sits between the set points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    /// Hysteresis output: should the valve be open?
    pub desired_open: bool,
    /// What is actually commanded this cycle; differs from `desired_open`
    /// while jogging.
    pub drive_open: bool,
    /// Latch: the open relay (VALVE1) is energised.
    pub open_relay_on: bool,
    /// Latch: the close relay (VALVE2) is energised.
    pub close_relay_on: bool,
    /// Anti-stick jiggle in progress.
    pub jiggling: bool,
}

/// Hardware and state handles for one control cycle.
pub struct Cycle<'a> {
    pub nv: &'a dyn NonVolatile,
    pub probes: &'a mut dyn ProbeBus,
    pub io: &'a mut dyn DigitalIo,
    pub timer: &'a mut dyn CycleTimer,
    pub telemetry: &'a mut Telemetry,
}

fn nv_offset(reg: &'static Register) -> ControlResult<u16> {
    reg.storage
        .nv_span()
        .map(|(offset, _)| offset)
        .ok_or(ControlError::BadRegisterTable { register: reg.name })
}

fn nv_temperature(nv: &dyn NonVolatile, reg: &'static Register) -> ControlResult<Temperature> {
    let mut bytes = [0u8; 4];
    nv.read_block(nv_offset(reg)?, &mut bytes);
    Ok(Temperature::from_le_bytes(bytes))
}

fn nv_u16(nv: &dyn NonVolatile, reg: &'static Register) -> ControlResult<u16> {
    let mut bytes = [0u8; 2];
    nv.read_block(nv_offset(reg)?, &mut bytes);
    Ok(u16::from_le_bytes(bytes))
}

/// The thermostat/valve controller.
#[derive(Debug, Default)]
pub struct ValveController {
    state: ControlState,
}

impl ValveController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Run one control cycle: acquire readings, re-evaluate alarms, apply
    /// hysteresis and the jog procedure, drive the relays.
    ///
    /// If the primary probe has no reading the cycle raises the
    /// no-temperature alarm and aborts, leaving the drive state, relay
    /// latches and the other alarms exactly as the previous cycle left them.
    pub fn run_cycle(&mut self, cx: &mut Cycle<'_>) -> ControlResult<()> {
        for id in ProbeId::ALL {
            let reading = self.read_probe(cx, id)?;
            cx.telemetry.set_probe(id, reading);
        }

        // Don't be a thermostat if we don't have a reading.
        let Some(t0) = cx.telemetry.probe(ProbeId::T0) else {
            if !cx.telemetry.alarms.contains(Alarms::NO_TEMPERATURE) {
                tracing::warn!("primary probe has no reading; holding valve state");
            }
            cx.telemetry.alarms.insert(Alarms::NO_TEMPERATURE);
            return Ok(());
        };
        cx.telemetry.alarms.remove(Alarms::NO_TEMPERATURE);

        let set_hi = nv_temperature(cx.nv, &directory::SET_HI)?;
        let set_lo = nv_temperature(cx.nv, &directory::SET_LO)?;
        let alarm_hi = nv_temperature(cx.nv, &directory::ALARM_HI)?;
        let alarm_lo = nv_temperature(cx.nv, &directory::ALARM_LO)?;
        let jog_hi = nv_temperature(cx.nv, &directory::JOG_HI)?;
        let jog_lo = nv_temperature(cx.nv, &directory::JOG_LO)?;
        let topology =
            ValveTopology::from_config(cx.nv.read_byte(nv_offset(&directory::VTYPE)?));

        cx.telemetry
            .alarms
            .assign(Alarms::TEMPERATURE_HIGH, t0 > alarm_hi);
        cx.telemetry
            .alarms
            .assign(Alarms::TEMPERATURE_LOW, t0 < alarm_lo);

        // Hysteresis: between the set points the desired state holds.
        if t0 > set_hi {
            self.state.desired_open = true;
        }
        if t0 < set_lo {
            self.state.desired_open = false;
        }
        self.state.drive_open = self.state.desired_open;

        // A reading outside the jog band suggests the valve is stuck.
        // Alternate between inverting the drive for jog/flip ticks and
        // resting for jog/wait ticks; one countdown timer serves both
        // phases, counting to zero and staying there until reloaded.
        if t0 < jog_lo || t0 > jog_hi {
            if !cx.telemetry.alarms.contains(Alarms::VALVE_STUCK) {
                tracing::warn!(reading = %t0, "reading outside jog band; jogging valve");
            }
            cx.telemetry.alarms.insert(Alarms::VALVE_STUCK);
            if cx.timer.remaining() == 0 {
                self.state.jiggling = !self.state.jiggling;
                let duration = if self.state.jiggling {
                    nv_u16(cx.nv, &directory::JOG_FLIP)?
                } else {
                    nv_u16(cx.nv, &directory::JOG_WAIT)?
                };
                cx.timer.load(duration);
            }
            if self.state.jiggling {
                self.state.drive_open = !self.state.drive_open;
            }
        } else {
            cx.telemetry.alarms.remove(Alarms::VALVE_STUCK);
            // Let a flip in progress finish, then settle for jog/wait.
            if self.state.jiggling && cx.timer.remaining() == 0 {
                self.state.jiggling = false;
                cx.timer.load(nv_u16(cx.nv, &directory::JOG_WAIT)?);
            }
        }

        self.drive_relays(topology, cx.io);
        Ok(())
    }

    fn read_probe(
        &self,
        cx: &mut Cycle<'_>,
        id: ProbeId,
    ) -> ControlResult<Option<Temperature>> {
        let reg = directory::probe_id_register(id);
        let mut bytes = [0u8; 8];
        cx.nv.read_block(nv_offset(reg)?, &mut bytes);
        let addr = SensorAddress(bytes);
        if addr.is_unset() {
            return Ok(None);
        }
        Ok(cx.probes.read_temperature(addr))
    }

    /// Relay transitions are edge-triggered against the latch flags so an
    /// unchanged drive state never pulses a relay twice.
    fn drive_relays(&mut self, topology: ValveTopology, io: &mut dyn DigitalIo) {
        let drive = self.state.drive_open;
        match topology {
            ValveTopology::SpringReturn => {
                if drive && !self.state.open_relay_on {
                    io.set_relay(RelayId::Valve1);
                    self.state.open_relay_on = true;
                    tracing::debug!("open relay energised");
                }
                if !drive && self.state.open_relay_on {
                    io.reset_relay(RelayId::Valve1);
                    self.state.open_relay_on = false;
                    tracing::debug!("open relay released");
                }
            }
            // Drive logic is identical with and without limit sensors; the
            // sensors only affect status reporting. The two relays are
            // mutually exclusive: always release one before energising the
            // other.
            ValveTopology::BallNoSensors | ValveTopology::BallWithSensors => {
                if drive {
                    if self.state.close_relay_on {
                        io.reset_relay(RelayId::Valve2);
                        self.state.close_relay_on = false;
                    }
                    if !self.state.open_relay_on {
                        io.set_relay(RelayId::Valve1);
                        self.state.open_relay_on = true;
                        tracing::debug!("ball valve driving open");
                    }
                } else {
                    if self.state.open_relay_on {
                        io.reset_relay(RelayId::Valve1);
                        self.state.open_relay_on = false;
                    }
                    if !self.state.close_relay_on {
                        io.set_relay(RelayId::Valve2);
                        self.state.close_relay_on = true;
                        tracing::debug!("ball valve driving closed");
                    }
                }
            }
            ValveTopology::Unknown(_) => {}
        }
    }

    /// Derive the externally observable valve status. Pure function of the
    /// configured topology, the desired state and the live limit sensors;
    /// callable at any time, independent of the cycle.
    pub fn valve_state(&self, nv: &dyn NonVolatile, io: &dyn DigitalIo) -> ValveState {
        let Some((offset, _)) = directory::VTYPE.storage.nv_span() else {
            return ValveState::Error;
        };
        let topology = ValveTopology::from_config(nv.read_byte(offset));
        let v1 = io.read_pin(PinId::Valve1Sense);
        let v2 = io.read_pin(PinId::Valve2Sense);
        let open = self.state.desired_open;
        match topology {
            ValveTopology::SpringReturn => match (open, v1) {
                (true, true) => ValveState::Open,
                (true, false) => ValveState::Opening,
                (false, true) => ValveState::Closing,
                (false, false) => ValveState::Closed,
            },
            ValveTopology::BallNoSensors => {
                if open {
                    ValveState::Open
                } else {
                    ValveState::Closed
                }
            }
            ValveTopology::BallWithSensors => {
                if v1 && v2 {
                    // Both limit sensors asserted at once is a wiring fault.
                    ValveState::Error
                } else if open {
                    if v1 {
                        ValveState::Open
                    } else {
                        ValveState::Opening
                    }
                } else if v2 {
                    ValveState::Closed
                } else {
                    ValveState::Closing
                }
            }
            ValveTopology::Unknown(_) => ValveState::Error,
        }
    }
}

/// Adapts a controller plus its hardware handles to the register directory's
/// status seam, so the `v0` register can render live status.
pub struct StatusView<'a> {
    pub controller: &'a ValveController,
    pub nv: &'a dyn NonVolatile,
    pub io: &'a dyn DigitalIo,
}

impl ValveStatusSource for StatusView<'_> {
    fn valve_state(&self) -> ValveState {
        self.controller.valve_state(self.nv, self.io)
    }
}
