//! Hardware collaborator traits.
//!
//! The core never touches hardware directly: non-volatile memory, relays,
//! limit-sensor pins, the one-wire bus and the jog countdown timer all sit
//! behind these traits. `MemoryNv` is the host-side non-volatile backend used
//! by the CLI and by tests.

use crate::address::SensorAddress;
use crate::temperature::Temperature;
use crate::valve::ValveState;

/// Size of the non-volatile region addressed by the register layout.
pub const NV_SIZE: usize = 1024;

/// Byte value of erased non-volatile memory.
pub const NV_ERASED: u8 = 0xFF;

/// Raw non-volatile memory access.
///
/// Offsets and lengths come from the register table's fixed layout; an
/// implementation is free to panic on out-of-range access since that is a
/// build-time table error, not runtime input.
pub trait NonVolatile {
    fn read_block(&self, offset: u16, buf: &mut [u8]);
    fn write_block(&mut self, offset: u16, data: &[u8]);

    fn read_byte(&self, offset: u16) -> u8 {
        let mut b = [0u8; 1];
        self.read_block(offset, &mut b);
        b[0]
    }
}

/// In-memory non-volatile backend, initialised to the erased state.
#[derive(Debug, Clone)]
pub struct MemoryNv {
    bytes: Vec<u8>,
}

impl MemoryNv {
    pub fn new() -> Self {
        Self {
            bytes: vec![NV_ERASED; NV_SIZE],
        }
    }

    /// Wrap an existing image, padding or truncating to `NV_SIZE`.
    pub fn from_image(mut image: Vec<u8>) -> Self {
        image.resize(NV_SIZE, NV_ERASED);
        Self { bytes: image }
    }

    pub fn image(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for MemoryNv {
    fn default() -> Self {
        Self::new()
    }
}

impl NonVolatile for MemoryNv {
    fn read_block(&self, offset: u16, buf: &mut [u8]) {
        let start = offset as usize;
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
    }

    fn write_block(&mut self, offset: u16, data: &[u8]) {
        let start = offset as usize;
        self.bytes[start..start + data.len()].copy_from_slice(data);
    }
}

/// The two latching relay coils driving the valve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelayId {
    /// Opens a spring-return valve, or the "open" coil of a ball valve.
    Valve1,
    /// The "close" coil of a ball valve.
    Valve2,
}

/// Digital inputs read by status derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinId {
    /// Spring-return position sensor, or ball-valve open limit sensor.
    Valve1Sense,
    /// Ball-valve closed limit sensor.
    Valve2Sense,
}

/// Relay drive and pin read access.
pub trait DigitalIo {
    fn set_relay(&mut self, id: RelayId);
    fn reset_relay(&mut self, id: RelayId);
    fn read_pin(&self, id: PinId) -> bool;
}

/// The one-wire temperature bus. Returns `None` when the addressed probe is
/// absent or the conversion failed; fault accounting happens inside the bus
/// driver via the error counters.
pub trait ProbeBus {
    fn read_temperature(&mut self, addr: SensorAddress) -> Option<Temperature>;
}

/// The jog countdown timer: loaded with a duration in timer ticks, counts
/// down to zero on its own and stays there.
pub trait CycleTimer {
    fn load(&mut self, ticks: u16);
    fn remaining(&self) -> u16;
}

/// Seam through which the register directory obtains the derived valve
/// status; implemented by the control state machine.
pub trait ValveStatusSource {
    fn valve_state(&self) -> ValveState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_nv_starts_erased() {
        let nv = MemoryNv::new();
        assert!(nv.image().iter().all(|&b| b == NV_ERASED));
    }

    #[test]
    fn block_write_then_read() {
        let mut nv = MemoryNv::new();
        nv.write_block(0x50, &[1, 2, 3, 4]);
        let mut buf = [0u8; 4];
        nv.read_block(0x50, &mut buf);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(nv.read_byte(0x51), 2);
    }

    #[test]
    fn from_image_pads_short_images() {
        let nv = MemoryNv::from_image(vec![0u8; 4]);
        assert_eq!(nv.image().len(), NV_SIZE);
        assert_eq!(nv.read_byte(4), NV_ERASED);
    }
}
