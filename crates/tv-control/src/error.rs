//! Error types for the control state machine.

use thiserror::Error;

/// Result type for control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors from the control cycle. These indicate register-table construction
/// mistakes, not runtime conditions: sensor faults and malformed values are
/// handled by alarms and by the write boundary respectively.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// A register the cycle needs is not backed by non-volatile storage.
    #[error("register {register} is not NV-backed")]
    BadRegisterTable { register: &'static str },
}
