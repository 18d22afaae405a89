//! Text codecs: storage bytes to display text and back.
//!
//! Each register names one codec; dispatch is a match over (codec, storage).
//! Read never fails — a codec/storage mismatch (a table construction error)
//! renders as an empty string. Write validates the text completely before
//! touching storage, so a rejected write leaves everything unmodified.

use crate::error::{RegistryError, RegistryResult};
use crate::register::Register;
use crate::storage::{RamSlot, Storage};
use tv_core::{
    CoreError, DigitalIo, NonVolatile, SensorAddress, Telemetry, Temperature, ValveStatusSource,
};

/// How a register's raw storage is rendered as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Codec {
    /// Raw bytes, NUL-padded/truncated. An erased (leading 0xFF) block reads
    /// as the empty string.
    FixedString,
    /// Decimal unsigned, one byte.
    U8,
    /// Decimal unsigned, two bytes little-endian.
    U16,
    /// Decimal unsigned, four bytes big-endian. Read-only in this build; the
    /// reprogramming tool maintains the value.
    U32BigEndian,
    /// Fixed-point temperature stored as a little-endian i32, 1/10000 °C.
    /// Renders with one fractional digit; written text is float-parsed and
    /// rescaled.
    Temperature,
    /// A cached probe reading; `None` renders as "None".
    ProbeTemperature,
    /// Eight-byte one-wire ROM address as 16 hex digits.
    SensorAddress,
    /// Saturating fault counter. Writing *decrements* by the written amount
    /// rather than setting, so faults recorded between a read and the
    /// acknowledge are never lost.
    ErrorCounter,
    /// Bounded summary of the live alarm bitset.
    AlarmSummary,
    /// Derived valve status from the control state machine.
    ValveStatus,
    /// A digital input pin as "0"/"1".
    PinBit,
}

/// Everything a register read may need to consult.
pub struct ReadEnv<'a> {
    pub nv: &'a dyn NonVolatile,
    pub io: &'a dyn DigitalIo,
    pub telemetry: &'a Telemetry,
    pub valve: &'a dyn ValveStatusSource,
}

fn nv_bytes(nv: &dyn NonVolatile, offset: u16, len: u8) -> Vec<u8> {
    let mut buf = vec![0u8; len as usize];
    nv.read_block(offset, &mut buf);
    buf
}

fn nv_array<const N: usize>(nv: &dyn NonVolatile, offset: u16) -> [u8; N] {
    let mut buf = [0u8; N];
    nv.read_block(offset, &mut buf);
    buf
}

/// Truncate to at most `max` bytes on a character boundary.
fn bound(mut s: String, max: usize) -> String {
    if s.len() > max {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}

fn decode_fixed_string(block: &[u8]) -> String {
    if block.first() == Some(&0xFF) {
        // Uninitialised non-volatile memory reads as empty.
        return String::new();
    }
    let end = block.iter().position(|&b| b == 0).unwrap_or(block.len());
    String::from_utf8_lossy(&block[..end]).into_owned()
}

impl Register {
    /// Render this register as text, truncated to fit a caller buffer of
    /// `cap` bytes. The protocol reserves the last byte for the terminator,
    /// so at most `cap - 1` bytes of text are returned.
    pub fn read(&self, env: &ReadEnv<'_>, cap: usize) -> String {
        bound(self.render(env), cap.saturating_sub(1))
    }

    fn render(&self, env: &ReadEnv<'_>) -> String {
        match (self.codec, &self.storage) {
            (Codec::FixedString, Storage::NonVolatile { offset, len }) => {
                decode_fixed_string(&nv_bytes(env.nv, *offset, *len))
            }
            (Codec::FixedString, Storage::Constant(text)) => (*text).to_string(),
            (Codec::U8, Storage::NonVolatile { offset, .. }) => {
                env.nv.read_byte(*offset).to_string()
            }
            (Codec::U16, Storage::NonVolatile { offset, .. }) => {
                u16::from_le_bytes(nv_array(env.nv, *offset)).to_string()
            }
            (Codec::U32BigEndian, Storage::NonVolatile { offset, .. }) => {
                u32::from_be_bytes(nv_array(env.nv, *offset)).to_string()
            }
            (Codec::Temperature, Storage::NonVolatile { offset, .. }) => {
                Temperature::from_le_bytes(nv_array(env.nv, *offset)).to_string()
            }
            (Codec::ProbeTemperature, Storage::Ram(RamSlot::Probe(id))) => {
                match env.telemetry.probe(*id) {
                    Some(t) => t.to_string(),
                    None => "None".to_string(),
                }
            }
            (Codec::SensorAddress, Storage::NonVolatile { offset, .. }) => {
                SensorAddress(nv_array(env.nv, *offset)).to_string()
            }
            (Codec::ErrorCounter, Storage::Ram(RamSlot::Counter(id))) => {
                env.telemetry.counter(*id).get().to_string()
            }
            (Codec::AlarmSummary, Storage::Ram(RamSlot::Alarms)) => {
                env.telemetry.alarms.summary()
            }
            (Codec::ValveStatus, _) => env.valve.valve_state().to_string(),
            (Codec::PinBit, Storage::Pin(pin)) => {
                if env.io.read_pin(*pin) { "1" } else { "0" }.to_string()
            }
            // Codec/storage mismatch: a table construction error, not input.
            _ => String::new(),
        }
    }

    /// Parse `text` and update storage. Fails without side effects on
    /// malformed input or when the register has no write codec.
    pub fn write(
        &self,
        nv: &mut dyn NonVolatile,
        telemetry: &Telemetry,
        text: &str,
    ) -> RegistryResult<()> {
        if !self.writable {
            return Err(RegistryError::ReadOnly);
        }
        match (self.codec, &self.storage) {
            (Codec::FixedString, Storage::NonVolatile { offset, len }) => {
                let mut block = vec![0u8; *len as usize];
                let take = text.len().min(block.len());
                block[..take].copy_from_slice(&text.as_bytes()[..take]);
                nv.write_block(*offset, &block);
            }
            (Codec::U8, Storage::NonVolatile { offset, .. }) => {
                let v: u8 = text
                    .trim()
                    .parse()
                    .map_err(|_| RegistryError::Malformed { what: "expected u8" })?;
                nv.write_block(*offset, &[v]);
            }
            (Codec::U16, Storage::NonVolatile { offset, .. }) => {
                let v: u16 = text
                    .trim()
                    .parse()
                    .map_err(|_| RegistryError::Malformed { what: "expected u16" })?;
                nv.write_block(*offset, &v.to_le_bytes());
            }
            (Codec::Temperature, Storage::NonVolatile { offset, .. }) => {
                let t: Temperature = text.parse().map_err(|_| RegistryError::Malformed {
                    what: "expected temperature",
                })?;
                nv.write_block(*offset, &t.to_le_bytes());
            }
            (Codec::SensorAddress, Storage::NonVolatile { offset, .. }) => {
                let addr: SensorAddress = text.parse().map_err(|_| RegistryError::Malformed {
                    what: "expected 16 hex digits",
                })?;
                nv.write_block(*offset, addr.as_bytes());
            }
            (Codec::ErrorCounter, Storage::Ram(RamSlot::Counter(id))) => {
                let dec: u8 = text.trim().parse().map_err(|_| RegistryError::Malformed {
                    what: "expected decrement",
                })?;
                telemetry.counter(*id).acknowledge(dec).map_err(|e| match e {
                    CoreError::CounterUnderrun { requested, current } => {
                        RegistryError::CounterUnderrun { requested, current }
                    }
                    _ => RegistryError::Malformed {
                        what: "counter rejected write",
                    },
                })?;
            }
            _ => return Err(RegistryError::ReadOnly),
        }
        tracing::debug!(register = self.name, value = text, "register written");
        Ok(())
    }
}
