//! Level-triggered process alarms.
//!
//! Alarms are re-evaluated every control cycle and never latch on their own;
//! anything sticky (acknowledgement, annunciation) belongs to an external
//! alarm presenter.

use bitflags::bitflags;

bitflags! {
    /// The alarm bitset published by the control cycle.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Alarms: u8 {
        /// Primary probe returned no reading; the cycle was aborted.
        const NO_TEMPERATURE = 0b0000_0001;
        /// Primary reading above the high alarm threshold.
        const TEMPERATURE_HIGH = 0b0000_0010;
        /// Primary reading below the low alarm threshold.
        const TEMPERATURE_LOW = 0b0000_0100;
        /// Primary reading outside the jog band; valve suspected stuck.
        const VALVE_STUCK = 0b0000_1000;
    }
}

impl Alarms {
    /// Set or clear a flag from a level condition.
    pub fn assign(&mut self, flag: Alarms, active: bool) {
        if active {
            self.insert(flag);
        } else {
            self.remove(flag);
        }
    }

    /// Bounded text summary for the `alarm` register (at most 16 bytes).
    pub fn summary(&self) -> String {
        if self.is_empty() {
            return "none".to_string();
        }
        let mut parts = Vec::new();
        if self.contains(Alarms::TEMPERATURE_HIGH) {
            parts.push("HI");
        }
        if self.contains(Alarms::TEMPERATURE_LOW) {
            parts.push("LO");
        }
        if self.contains(Alarms::VALVE_STUCK) {
            parts.push("STK");
        }
        if self.contains(Alarms::NO_TEMPERATURE) {
            parts.push("NOTMP");
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sets_and_clears() {
        let mut a = Alarms::default();
        a.assign(Alarms::TEMPERATURE_HIGH, true);
        assert!(a.contains(Alarms::TEMPERATURE_HIGH));
        a.assign(Alarms::TEMPERATURE_HIGH, false);
        assert!(a.is_empty());
    }

    #[test]
    fn summary_fits_sixteen_bytes() {
        let all = Alarms::all();
        assert_eq!(all.summary(), "HI LO STK NOTMP");
        assert!(all.summary().len() <= 16);
        assert_eq!(Alarms::default().summary(), "none");
    }
}
