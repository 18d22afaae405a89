//! tv-control: the thermostat/valve control state machine.
//!
//! Once per control cycle the controller reads the probes, re-evaluates the
//! alarm levels, applies set-point hysteresis, runs the anti-stick jog
//! procedure and drives the valve relays. Between cycles it answers status
//! queries by combining its desired state with the live limit-sensor pins.
//!
//! All configuration comes from named registers in the directory; all
//! hardware access goes through the tv-core collaborator traits, so the
//! whole state machine runs unmodified against the simulated board.

pub mod controller;
pub mod error;

pub use controller::{ControlState, Cycle, StatusView, ValveController};
pub use error::{ControlError, ControlResult};
