//! Saturating fault counters with bounded acknowledgement.
//!
//! Fault-detecting producers (the one-wire service routines) only ever
//! increment a counter; the console acknowledges faults by writing a
//! decrement. Decrementing instead of overwriting means an error recorded
//! between a read and the subsequent acknowledge is never lost. Producers may
//! run on an interrupt/async path, so both operations go through one atomic
//! compare-exchange loop rather than a read-modify-write.

use crate::error::CoreError;
use std::sync::atomic::{AtomicU8, Ordering};

/// An 8-bit saturating fault counter.
#[derive(Debug, Default)]
pub struct ErrorCounter(AtomicU8);

impl ErrorCounter {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    /// Record one fault. Saturates at `u8::MAX` instead of wrapping.
    pub fn record(&self) {
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                (v < u8::MAX).then(|| v + 1)
            });
    }

    pub fn get(&self) -> u8 {
        self.0.load(Ordering::Acquire)
    }

    /// Acknowledge `dec` faults. Fails without mutating when `dec` exceeds
    /// the current value, so the caller can re-read and retry.
    pub fn acknowledge(&self, dec: u8) -> Result<(), CoreError> {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |v| {
                v.checked_sub(dec)
            })
            .map(|_| ())
            .map_err(|current| CoreError::CounterUnderrun {
                requested: dec,
                current,
            })
    }
}

/// The one-wire fault counters exposed as `err/*` registers.
#[derive(Debug, Default)]
pub struct ErrorCounters {
    /// Probe missing from the bus.
    pub missing: ErrorCounter,
    /// Bus held low (shorted).
    pub shorted: ErrorCounter,
    /// Scratchpad CRC mismatch.
    pub crc: ErrorCounter,
    /// Parasite-power fault.
    pub power: ErrorCounter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn record_saturates() {
        let c = ErrorCounter::new();
        for _ in 0..300 {
            c.record();
        }
        assert_eq!(c.get(), u8::MAX);
    }

    #[test]
    fn acknowledge_within_bounds() {
        let c = ErrorCounter::new();
        for _ in 0..5 {
            c.record();
        }
        c.acknowledge(3).unwrap();
        assert_eq!(c.get(), 2);
        c.acknowledge(2).unwrap();
        assert_eq!(c.get(), 0);
    }

    #[test]
    fn acknowledge_underrun_leaves_counter_unchanged() {
        let c = ErrorCounter::new();
        c.record();
        c.record();
        let err = c.acknowledge(3).unwrap_err();
        assert_eq!(
            err,
            CoreError::CounterUnderrun {
                requested: 3,
                current: 2
            }
        );
        assert_eq!(c.get(), 2);
    }

    #[test]
    fn concurrent_record_and_acknowledge_stays_in_range() {
        let c = Arc::new(ErrorCounter::new());
        for _ in 0..50 {
            c.record();
        }
        let producer = {
            let c = Arc::clone(&c);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    c.record();
                }
            })
        };
        let mut acked = 0u32;
        while acked < 100 {
            if c.acknowledge(1).is_ok() {
                acked += 1;
            }
        }
        producer.join().unwrap();
        // 50 + 200 recorded, 100 acknowledged, nothing lost or wrapped.
        assert_eq!(c.get() as u32, 150);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_sequence_stays_in_range(ops in prop::collection::vec((any::<bool>(), any::<u8>()), 0..64)) {
            let c = ErrorCounter::new();
            let mut model: u16 = 0;
            for (is_record, dec) in ops {
                if is_record {
                    c.record();
                    model = (model + 1).min(u8::MAX as u16);
                } else if c.acknowledge(dec).is_ok() {
                    model -= dec as u16;
                }
                prop_assert_eq!(c.get() as u16, model);
            }
        }
    }
}
