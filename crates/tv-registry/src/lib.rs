//! tv-registry: the named, typed register directory.
//!
//! Every externally visible piece of controller state — non-volatile
//! configuration, live telemetry, derived valve status, firmware constants —
//! is a [`Register`]: a stable short name bound to one storage location and
//! one text codec. The directory is a fixed ordered table; consoles and
//! displays address registers by index or by name and exchange only bounded
//! text, never raw storage.
//!
//! # Architecture
//!
//! - [`Storage`] says *where* a register's bytes live
//! - [`Codec`] says *how* they become text (and back, for writable registers)
//! - [`directory`] is the compile-time table binding the two together
//!
//! Dispatch is a pattern match over two closed enums; a register's physical
//! representation stays private to its codec arm.

pub mod codec;
pub mod directory;
pub mod error;
pub mod register;
pub mod storage;

pub use codec::{Codec, ReadEnv};
pub use error::{RegistryError, RegistryResult};
pub use register::Register;
pub use storage::{RamSlot, Storage};

#[cfg(test)]
pub(crate) mod testing;
