//! Unified error types for the controller.
//!
//! A single `Error` enum that every subsystem funnels into, so the event
//! loop and the console front-end report failures uniformly.  Parameter
//! tree errors carry the offending path; hardware failures are wrapped in
//! [`DeviceError`] and passed through untouched.

use core::fmt;

use embedded_hal::{i2c, spi};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The path does not exist in the parameter tree.
    NotFound(String),
    /// A write targeted a parameter that has no setter.
    ReadOnly(String),
    /// A setter rejected the value it was given.
    InvalidValue { path: String, reason: &'static str },
    /// A request could not be decoded into a path and value.
    MalformedInput(String),
    /// The output bank or temperature sensor failed.
    Device(DeviceError),
    /// A bus device node could not be opened or configured.
    Open { device: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Invalid path: {path}"),
            Self::ReadOnly(path) => write!(f, "Parameter {path} is read-only"),
            Self::InvalidValue { path, reason } => {
                write!(f, "Invalid value for {path}: {reason}")
            }
            Self::MalformedInput(msg) => write!(f, "Failed to decode request: {msg}"),
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Open { device, reason } => write!(f, "Failed to open {device}: {reason}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

impl Error {
    pub(crate) fn invalid(path: &str, reason: &'static str) -> Self {
        Self::InvalidValue {
            path: path.to_owned(),
            reason,
        }
    }
}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

/// Failures reported by the hardware collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// I2C transaction with the output expander failed.
    I2c(i2c::ErrorKind),
    /// SPI transaction with the thermocouple converter failed.
    Spi(spi::ErrorKind),
    /// The thermocouple converter latched a fault (raw status register).
    ThermocoupleFault(u8),
    /// Injected failure from a simulated or mock device.
    Simulated(&'static str),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(kind) => write!(f, "I2C bus error: {kind}"),
            Self::Spi(kind) => write!(f, "SPI bus error: {kind}"),
            Self::ThermocoupleFault(sr) => write!(f, "thermocouple fault, status=0b{sr:08b}"),
            Self::Simulated(msg) => write!(f, "simulated failure: {msg}"),
        }
    }
}

impl std::error::Error for DeviceError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
