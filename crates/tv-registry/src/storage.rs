//! Storage locations: where a register's bytes live.

use tv_core::{CounterId, PinId, ProbeId};

/// Names a live RAM value owned by [`tv_core::Telemetry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RamSlot {
    /// A cached probe reading.
    Probe(ProbeId),
    /// A one-wire fault counter.
    Counter(CounterId),
    /// The alarm bitset.
    Alarms,
}

/// The physical location of a register's value. Exactly one variant per
/// register; the byte layout must match what the register's codec expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Storage {
    /// A fixed byte range in non-volatile memory. The offset/length pair is
    /// part of the persisted-configuration compatibility surface.
    NonVolatile { offset: u16, len: u8 },
    /// A live in-memory value.
    Ram(RamSlot),
    /// A digital input pin, read as 0/1.
    Pin(PinId),
    /// Read-only bytes embedded in the firmware image.
    Constant(&'static str),
}

impl Storage {
    /// The non-volatile span, if this register is NV-backed.
    pub const fn nv_span(&self) -> Option<(u16, u8)> {
        match self {
            Storage::NonVolatile { offset, len } => Some((*offset, *len)),
            _ => None,
        }
    }
}
