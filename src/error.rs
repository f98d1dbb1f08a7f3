//! Unified error types for the watering controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the FSM context without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Settings violate their invariants; the controller refuses to start.
    InvalidSettings(&'static str),
    /// A sensor could not be read or returned unusable data.
    Sensor(SensorError),
    /// Runtime configuration (outside the watering settings) is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Failure reported by a sensor read.  While one is active the controller
/// shows the `Error` indicator and will not start auto watering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer.
    Unavailable,
    /// The reading is not physically plausible (rail value, NaN, infinity).
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "sensor unavailable"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
