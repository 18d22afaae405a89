//! tv-core: stable foundation for thermovalve.
//!
//! Contains:
//! - temperature (fixed-point reading type + text form)
//! - address (one-wire sensor ROM addresses)
//! - alarm (level-triggered alarm bitset)
//! - counter (saturating fault counters with bounded acknowledge)
//! - telemetry (consolidated live RAM state)
//! - hal (hardware collaborator traits + in-memory NV backend)
//! - valve (valve topology and derived status types)
//! - error (shared error types)

pub mod address;
pub mod alarm;
pub mod counter;
pub mod error;
pub mod hal;
pub mod telemetry;
pub mod temperature;
pub mod valve;

// Re-exports: nice ergonomics for downstream crates
pub use address::SensorAddress;
pub use alarm::Alarms;
pub use counter::{ErrorCounter, ErrorCounters};
pub use error::{CoreError, CoreResult};
pub use hal::{CycleTimer, DigitalIo, MemoryNv, NonVolatile, PinId, ProbeBus, RelayId,
    ValveStatusSource, NV_ERASED, NV_SIZE};
pub use telemetry::{CounterId, ProbeId, Telemetry};
pub use temperature::Temperature;
pub use valve::{ValveState, ValveTopology};
