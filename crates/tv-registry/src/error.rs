//! Error types for register directory operations.

use thiserror::Error;

/// Result type for register writes.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Why a register write was rejected. Reads cannot fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The register has no write codec.
    #[error("register is read-only")]
    ReadOnly,

    /// The supplied text does not parse as this register's type.
    #[error("malformed value: {what}")]
    Malformed { what: &'static str },

    /// An error-counter acknowledge asked for more than the counter holds.
    #[error("acknowledge exceeds counter value (requested={requested}, current={current})")]
    CounterUnderrun { requested: u8, current: u8 },
}
