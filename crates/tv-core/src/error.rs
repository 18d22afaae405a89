use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Malformed sensor address: expected 16 hex digits")]
    BadAddress,

    #[error("Malformed temperature: {what}")]
    BadTemperature { what: &'static str },

    #[error("Acknowledge exceeds counter value (requested={requested}, current={current})")]
    CounterUnderrun { requested: u8, current: u8 },
}
