//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, buttons, clock, event sinks,
//! configuration) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics,
//! so the domain core never touches hardware directly.

use core::fmt;

use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::fsm::context::IndicatorState;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Soil moisture in percent.  Finite values outside 0–100 are clamped
    /// by the caller.
    fn read_moisture(&mut self) -> Result<f32, SensorError>;

    /// Ambient air temperature in °C.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.  Every call is idempotent.
pub trait ActuatorPort {
    fn pump_on(&mut self);

    fn pump_off(&mut self);

    /// Query whether the pump relay is currently energised.
    fn is_pump_running(&self) -> bool;

    /// Show `state` on the status indicator.  Called every tick, even when
    /// unchanged; blinking is the implementation's business.
    fn set_indicator(&mut self, state: IndicatorState);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Button polling.  Debounce and edge detection happen behind this port;
/// each physical press is reported exactly once.
pub trait InputPort {
    fn is_mode_button_pressed(&mut self) -> bool;

    fn is_manual_button_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget status sink.  The domain emits structured
/// [`AppEvent`](super::events::AppEvent)s; `Display` on the event gives the
/// human-readable line.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: config source → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the startup configuration.  Read-only: settings are fixed for the
/// process lifetime and never written back.
pub trait ConfigPort {
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    /// Implementations MUST reject values that fail validation.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config source could not be read.
    IoError,
    /// The config source is not valid JSON for [`SystemConfig`].
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError => write!(f, "I/O error"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
