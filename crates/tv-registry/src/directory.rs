//! The static register directory.
//!
//! A fixed, ordered table of every register in the device. The table is
//! compile-time data; registers never appear or disappear at runtime, and the
//! non-volatile offsets below are a compatibility surface — moving one is a
//! breaking change to persisted configuration.

use crate::codec::Codec;
use crate::register::{Register, NAME_KEY_LEN};
use crate::storage::RamSlot;
use tv_core::{CounterId, PinId, ProbeId};

/// Firmware version reported by the `ver` register.
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub static IDENT: Register =
    Register::nv("ident", "Station ident", 0x03F4, 8, Codec::FixedString);

/// The reprogramming tool maintains this count in the last four bytes of
/// non-volatile memory, big-endian.
pub static FLASHCNT: Register =
    Register::nv_ro("flashcnt", "Reprogram count", 0x03FC, 4, Codec::U32BigEndian);

pub static VERSION: Register =
    Register::constant("ver", "Firmware version", FIRMWARE_VERSION);

pub static BL: Register = Register::nv("bl", "Backlight time", 0x03F2, 2, Codec::U16);

pub static BL_ALARM: Register =
    Register::nv("bl/alarm", "Alarm flash time", 0x03E0, 1, Codec::U8);

pub static ALARM: Register = Register::ram(
    "alarm",
    "Current alarm",
    RamSlot::Alarms,
    Codec::AlarmSummary,
    false,
);

pub static FPSETUP: Register = Register::nv("fpsetup", "Setup enable", 0x03F0, 1, Codec::U8);

pub static JOG_FLIP: Register =
    Register::nv("jog/flip", "Valve jog time", 0x03E2, 2, Codec::U16);

pub static JOG_WAIT: Register =
    Register::nv("jog/wait", "Jog try interval", 0x03E4, 2, Codec::U16);

macro_rules! probe_bank {
    ($reading:ident, $id:ident, $c0:ident, $c0r:ident, $prefix:literal, $pid:expr, $base:literal) => {
        pub static $reading: Register = Register::ram(
            $prefix,
            concat!($prefix, " probe reading"),
            RamSlot::Probe($pid),
            Codec::ProbeTemperature,
            false,
        );
        pub static $id: Register = Register::nv(
            concat!($prefix, "/id"),
            concat!($prefix, " probe address"),
            $base,
            8,
            Codec::SensorAddress,
        );
        pub static $c0: Register = Register::nv(
            concat!($prefix, "/c0"),
            concat!($prefix, " cal point 0"),
            $base + 8,
            2,
            Codec::U16,
        );
        pub static $c0r: Register = Register::nv(
            concat!($prefix, "/c0r"),
            concat!($prefix, " reading at c0"),
            $base + 0x0A,
            2,
            Codec::U16,
        );
    };
}

probe_bank!(T0, T0_ID, T0_C0, T0_C0R, "t0", ProbeId::T0, 0x010);
probe_bank!(T1, T1_ID, T1_C0, T1_C0R, "t1", ProbeId::T1, 0x020);
probe_bank!(T2, T2_ID, T2_C0, T2_C0R, "t2", ProbeId::T2, 0x030);
probe_bank!(T3, T3_ID, T3_C0, T3_C0R, "t3", ProbeId::T3, 0x040);

pub static V0: Register = Register::ram(
    "v0",
    "Valve state",
    RamSlot::Alarms, // status codec consults the state machine, not storage
    Codec::ValveStatus,
    false,
);

pub static V0_S: Register = Register::pin("v0/s", "Valve sense pin", PinId::Valve1Sense);

pub static VTYPE: Register = Register::nv("vtype", "Valve type", 0x03F1, 1, Codec::U8);

pub static SET_HI: Register =
    Register::nv("set/hi", "Upper set point", 0x050, 4, Codec::Temperature);

pub static SET_LO: Register =
    Register::nv("set/lo", "Lower set point", 0x054, 4, Codec::Temperature);

pub static MODE: Register = Register::nv("mode", "Mode name", 0x058, 8, Codec::FixedString);

pub static ALARM_HI: Register =
    Register::nv("alarm/hi", "High temp alarm", 0x3D0, 4, Codec::Temperature);

pub static ALARM_LO: Register =
    Register::nv("alarm/lo", "Low temp alarm", 0x3D4, 4, Codec::Temperature);

pub static JOG_HI: Register =
    Register::nv("jog/hi", "Valve stuck off", 0x3D8, 4, Codec::Temperature);

pub static JOG_LO: Register =
    Register::nv("jog/lo", "Valve stuck on", 0x3DC, 4, Codec::Temperature);

// Mode preset banks: a name plus set/alarm/jog points that the front panel
// copies into the live registers when a mode is selected. Stored as short
// fixed strings, like the original layout.
macro_rules! mode_bank {
    ($name:ident, $lo:ident, $hi:ident, $alo:ident, $ahi:ident, $jlo:ident, $jhi:ident,
     $prefix:literal, $base:literal, $alarm_base:literal) => {
        pub static $name: Register = Register::nv(
            concat!($prefix, "/name"),
            concat!("Mode ", $prefix, " name"),
            $base,
            8,
            Codec::FixedString,
        );
        pub static $lo: Register = Register::nv(
            concat!($prefix, "/lo"),
            concat!("Mode ", $prefix, " low set"),
            $base + 8,
            4,
            Codec::FixedString,
        );
        pub static $hi: Register = Register::nv(
            concat!($prefix, "/hi"),
            concat!("Mode ", $prefix, " hi set"),
            $base + 12,
            4,
            Codec::FixedString,
        );
        pub static $alo: Register = Register::nv(
            concat!($prefix, "/a/lo"),
            concat!("Mode ", $prefix, " alarm lo"),
            $alarm_base,
            4,
            Codec::FixedString,
        );
        pub static $ahi: Register = Register::nv(
            concat!($prefix, "/a/hi"),
            concat!("Mode ", $prefix, " alarm hi"),
            $alarm_base + 4,
            4,
            Codec::FixedString,
        );
        pub static $jlo: Register = Register::nv(
            concat!($prefix, "/j/lo"),
            concat!("Mode ", $prefix, " jog lo"),
            $alarm_base + 8,
            4,
            Codec::FixedString,
        );
        pub static $jhi: Register = Register::nv(
            concat!($prefix, "/j/hi"),
            concat!("Mode ", $prefix, " jog hi"),
            $alarm_base + 12,
            4,
            Codec::FixedString,
        );
    };
}

mode_bank!(M0_NAME, M0_LO, M0_HI, M0_A_LO, M0_A_HI, M0_J_LO, M0_J_HI, "m0", 0x060, 0x160);
mode_bank!(M1_NAME, M1_LO, M1_HI, M1_A_LO, M1_A_HI, M1_J_LO, M1_J_HI, "m1", 0x070, 0x170);
mode_bank!(M2_NAME, M2_LO, M2_HI, M2_A_LO, M2_A_HI, M2_J_LO, M2_J_HI, "m2", 0x080, 0x180);
mode_bank!(M3_NAME, M3_LO, M3_HI, M3_A_LO, M3_A_HI, M3_J_LO, M3_J_HI, "m3", 0x090, 0x190);
mode_bank!(M4_NAME, M4_LO, M4_HI, M4_A_LO, M4_A_HI, M4_J_LO, M4_J_HI, "m4", 0x0A0, 0x1A0);
mode_bank!(M5_NAME, M5_LO, M5_HI, M5_A_LO, M5_A_HI, M5_J_LO, M5_J_HI, "m5", 0x0B0, 0x1B0);

pub static ERR_MISS: Register = Register::ram(
    "err/miss",
    "owb missing",
    RamSlot::Counter(CounterId::Missing),
    Codec::ErrorCounter,
    true,
);
pub static ERR_SHRT: Register = Register::ram(
    "err/shrt",
    "owb shorted",
    RamSlot::Counter(CounterId::Shorted),
    Codec::ErrorCounter,
    true,
);
pub static ERR_CRC: Register = Register::ram(
    "err/crc",
    "DS18B20 bad CRC",
    RamSlot::Counter(CounterId::Crc),
    Codec::ErrorCounter,
    true,
);
pub static ERR_PWR: Register = Register::ram(
    "err/pwr",
    "DS18B20 no power",
    RamSlot::Counter(CounterId::Power),
    Codec::ErrorCounter,
    true,
);

static TABLE: &[&Register] = &[
    &IDENT, &FLASHCNT, &VERSION, &BL, &BL_ALARM, &ALARM, &FPSETUP,
    &JOG_FLIP, &JOG_WAIT,
    &T0, &T0_ID, &T0_C0, &T0_C0R,
    &T1, &T1_ID, &T1_C0, &T1_C0R,
    &T2, &T2_ID, &T2_C0, &T2_C0R,
    &T3, &T3_ID, &T3_C0, &T3_C0R,
    &V0, &V0_S, &VTYPE,
    &SET_HI, &SET_LO, &MODE, &ALARM_HI, &ALARM_LO, &JOG_HI, &JOG_LO,
    &M0_NAME, &M0_LO, &M0_HI, &M0_A_LO, &M0_A_HI, &M0_J_LO, &M0_J_HI,
    &M1_NAME, &M1_LO, &M1_HI, &M1_A_LO, &M1_A_HI, &M1_J_LO, &M1_J_HI,
    &M2_NAME, &M2_LO, &M2_HI, &M2_A_LO, &M2_A_HI, &M2_J_LO, &M2_J_HI,
    &M3_NAME, &M3_LO, &M3_HI, &M3_A_LO, &M3_A_HI, &M3_J_LO, &M3_J_HI,
    &M4_NAME, &M4_LO, &M4_HI, &M4_A_LO, &M4_A_HI, &M4_J_LO, &M4_J_HI,
    &M5_NAME, &M5_LO, &M5_HI, &M5_A_LO, &M5_A_HI, &M5_J_LO, &M5_J_HI,
    &ERR_MISS, &ERR_SHRT, &ERR_CRC, &ERR_PWR,
];

/// Number of registers in the directory.
pub fn count() -> usize {
    TABLE.len()
}

/// Register by table position; `None` when out of range.
pub fn by_index(n: usize) -> Option<&'static Register> {
    TABLE.get(n).copied()
}

/// Register by name: linear scan in table order, first match wins.
/// Comparison is case-sensitive over the first [`NAME_KEY_LEN`] bytes.
pub fn by_name(name: &str) -> Option<&'static Register> {
    let mut end = name.len().min(NAME_KEY_LEN);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    let key = &name[..end];
    TABLE.iter().find(|r| r.name_key() == key).copied()
}

/// The probe-address register for a given probe.
pub fn probe_id_register(id: ProbeId) -> &'static Register {
    match id {
        ProbeId::T0 => &T0_ID,
        ProbeId::T1 => &T1_ID,
        ProbeId::T2 => &T2_ID,
        ProbeId::T3 => &T3_ID,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::DESCRIPTION_LEN;
    use crate::storage::Storage;
    use crate::testing::TestBoard;
    use tv_core::NV_SIZE;

    #[test]
    fn by_index_out_of_range_is_none() {
        assert!(by_index(count()).is_none());
        assert!(by_index(0).is_some());
    }

    #[test]
    fn name_and_index_lookup_agree_for_all_registers() {
        for n in 0..count() {
            let reg = by_index(n).unwrap();
            let found = by_name(reg.name).unwrap();
            assert!(std::ptr::eq(reg, found), "mismatch for {}", reg.name);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(by_name("nonesuch").is_none());
        assert!(by_name("").is_none());
    }

    #[test]
    fn name_keys_are_unique() {
        for a in 0..count() {
            for b in (a + 1)..count() {
                let (ra, rb) = (by_index(a).unwrap(), by_index(b).unwrap());
                assert_ne!(ra.name_key(), rb.name_key(), "{} vs {}", ra.name, rb.name);
            }
        }
    }

    #[test]
    fn names_and_descriptions_fit_the_protocol() {
        for n in 0..count() {
            let reg = by_index(n).unwrap();
            assert!(reg.name.len() <= NAME_KEY_LEN, "{}", reg.name);
            assert!(reg.description.len() <= DESCRIPTION_LEN, "{}", reg.name);
        }
    }

    #[test]
    fn nv_spans_match_codec_width_and_fit() {
        for n in 0..count() {
            let reg = by_index(n).unwrap();
            if let Some((offset, len)) = reg.storage.nv_span() {
                assert!(offset as usize + len as usize <= NV_SIZE, "{}", reg.name);
                let expected = match reg.codec {
                    Codec::U8 => Some(1),
                    Codec::U16 => Some(2),
                    Codec::U32BigEndian | Codec::Temperature => Some(4),
                    Codec::SensorAddress => Some(8),
                    Codec::FixedString => None, // any length
                    _ => panic!("{} has a non-NV codec on NV storage", reg.name),
                };
                if let Some(expected) = expected {
                    assert_eq!(len, expected, "{}", reg.name);
                }
            }
        }
    }

    #[test]
    fn nv_spans_do_not_overlap() {
        let mut spans: Vec<(u16, u16, &str)> = (0..count())
            .filter_map(|n| {
                let reg = by_index(n).unwrap();
                reg.storage
                    .nv_span()
                    .map(|(off, len)| (off, off + len as u16, reg.name))
            })
            .collect();
        spans.sort();
        for pair in spans.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0,
                "{} overlaps {}",
                pair[0].2,
                pair[1].2
            );
        }
    }

    #[test]
    fn read_only_registers_never_mutate() {
        let mut board = TestBoard::new();
        let before = board.nv.image().to_vec();
        for n in 0..count() {
            let reg = by_index(n).unwrap();
            if !reg.writable {
                assert!(
                    reg.write(&mut board.nv, &board.telemetry, "0").is_err(),
                    "{} accepted a write",
                    reg.name
                );
            }
        }
        assert_eq!(board.nv.image(), &before[..]);
    }

    #[test]
    fn every_register_renders_without_panicking() {
        let board = TestBoard::new();
        for n in 0..count() {
            let reg = by_index(n).unwrap();
            let _ = reg.read(&board.env(), 17);
        }
    }

    #[test]
    fn version_register_reports_the_build() {
        let board = TestBoard::new();
        assert_eq!(VERSION.read(&board.env(), 32), FIRMWARE_VERSION);
    }

    #[test]
    fn set_points_round_trip_through_text() {
        let mut board = TestBoard::new();
        SET_HI.write(&mut board.nv, &board.telemetry, "20.0").unwrap();
        SET_LO.write(&mut board.nv, &board.telemetry, "10.0").unwrap();
        assert_eq!(SET_HI.read(&board.env(), 16), "20.0");
        assert_eq!(SET_LO.read(&board.env(), 16), "10.0");
    }

    #[test]
    fn mode_bank_presets_are_short_strings() {
        let mut board = TestBoard::new();
        M3_NAME.write(&mut board.nv, &board.telemetry, "lager").unwrap();
        M3_LO.write(&mut board.nv, &board.telemetry, "9.5").unwrap();
        assert_eq!(M3_NAME.read(&board.env(), 16), "lager");
        assert_eq!(M3_LO.read(&board.env(), 16), "9.5");
        // 4-byte preset field truncates longer text.
        M3_HI.write(&mut board.nv, &board.telemetry, "12.75").unwrap();
        assert_eq!(M3_HI.read(&board.env(), 16), "12.7");
    }

    #[test]
    fn storage_shapes_are_as_declared() {
        assert_eq!(
            SET_HI.storage,
            Storage::NonVolatile { offset: 0x050, len: 4 }
        );
        assert_eq!(IDENT.storage.nv_span(), Some((0x03F4, 8)));
        assert_eq!(FLASHCNT.storage.nv_span(), Some((0x03FC, 4)));
    }
}
