//! Register descriptors.

use crate::codec::Codec;
use crate::storage::{RamSlot, Storage};
use tv_core::PinId;

/// Number of name bytes that participate in lookup. Two names that agree on
/// their first eight bytes are indistinguishable to `by_name`; the table
/// keeps all names at most eight bytes so the question never arises.
pub const NAME_KEY_LEN: usize = 8;

/// Maximum description length exposed over the text protocol.
pub const DESCRIPTION_LEN: usize = 16;

/// An immutable register descriptor. Registers are defined once in the
/// static directory table and never change identity; the name is the
/// addressing key for all external access and must stay stable across
/// firmware versions.
#[derive(Debug)]
pub struct Register {
    pub name: &'static str,
    pub description: &'static str,
    pub storage: Storage,
    pub codec: Codec,
    pub writable: bool,
}

impl Register {
    /// Writable non-volatile register.
    pub const fn nv(
        name: &'static str,
        description: &'static str,
        offset: u16,
        len: u8,
        codec: Codec,
    ) -> Self {
        Self {
            name,
            description,
            storage: Storage::NonVolatile { offset, len },
            codec,
            writable: true,
        }
    }

    /// Read-only non-volatile register.
    pub const fn nv_ro(
        name: &'static str,
        description: &'static str,
        offset: u16,
        len: u8,
        codec: Codec,
    ) -> Self {
        Self {
            name,
            description,
            storage: Storage::NonVolatile { offset, len },
            codec,
            writable: false,
        }
    }

    /// RAM-backed register. Error counters are the only writable kind.
    pub const fn ram(
        name: &'static str,
        description: &'static str,
        slot: RamSlot,
        codec: Codec,
        writable: bool,
    ) -> Self {
        Self {
            name,
            description,
            storage: Storage::Ram(slot),
            codec,
            writable,
        }
    }

    /// Pin-backed register reading a digital input as 0/1.
    pub const fn pin(name: &'static str, description: &'static str, pin: PinId) -> Self {
        Self {
            name,
            description,
            storage: Storage::Pin(pin),
            codec: Codec::PinBit,
            writable: false,
        }
    }

    /// Firmware-embedded constant string.
    pub const fn constant(
        name: &'static str,
        description: &'static str,
        text: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            storage: Storage::Constant(text),
            codec: Codec::FixedString,
            writable: false,
        }
    }

    /// The portion of the name that participates in lookup.
    pub fn name_key(&self) -> &str {
        &self.name[..self.name.len().min(NAME_KEY_LEN)]
    }
}
