//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  `Display` renders the
//! human-readable status line; adapters decide where it goes.

use core::fmt;

use crate::error::SensorError;
use crate::fsm::OperatingMode;
use crate::fsm::context::{IndicatorState, PumpState};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The controller has started (carries the initial mode).
    Started(OperatingMode),

    /// The mode button flipped the operating mode.
    ModeChanged(OperatingMode),

    /// A running cycle was cut short by a mode change.
    PumpForcedOff,

    /// Fresh sensor readings were taken.
    SensorsRead {
        moisture_percent: f32,
        temperature_c: f32,
    },

    /// The moisture sensor stopped delivering usable readings.
    SensorFault(SensorError),

    /// The moisture sensor is delivering readings again.
    SensorRecovered,

    /// Auto mode started the pump because the soil is too dry.
    AutoWateringStarted { moisture_percent: f32 },

    /// Auto mode stopped the pump because the soil is moist enough.
    TargetReached { moisture_percent: f32 },

    /// Auto mode stopped the pump at the duration cap.
    WateringTimeout { elapsed_secs: u32 },

    /// The user started a manual watering cycle.
    ManualWateringStarted,

    /// A manual cycle ran its full duration.
    ManualWateringComplete,

    /// Periodic status snapshot.
    Telemetry(TelemetryData),
}

impl fmt::Display for AppEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started(mode) => write!(f, "System initialized - {mode} mode"),
            Self::ModeChanged(mode) => write!(f, "Mode changed: {mode}"),
            Self::PumpForcedOff => write!(f, "Mode change: pump forcibly turned OFF"),
            Self::SensorsRead {
                moisture_percent,
                temperature_c,
            } => write!(
                f,
                "Sensors - Moisture: {moisture_percent:.1}% | Temp: {temperature_c:.1}\u{00b0}C"
            ),
            Self::SensorFault(e) => {
                write!(f, "Sensor fault: {e} - auto watering suspended")
            }
            Self::SensorRecovered => write!(f, "Sensors recovered - auto watering resumed"),
            Self::AutoWateringStarted { moisture_percent } => write!(
                f,
                "AUTO: Starting pump - soil too dry ({moisture_percent:.1}%)"
            ),
            Self::TargetReached { moisture_percent } => write!(
                f,
                "AUTO: Target moisture reached ({moisture_percent:.1}%) - pump OFF"
            ),
            Self::WateringTimeout { elapsed_secs } => write!(
                f,
                "AUTO: Max watering time exceeded ({elapsed_secs}s) - pump OFF"
            ),
            Self::ManualWateringStarted => write!(f, "MANUAL: Pump activated by user"),
            Self::ManualWateringComplete => {
                write!(f, "MANUAL: Watering duration complete - pump OFF")
            }
            Self::Telemetry(t) => write!(f, "{t}"),
        }
    }
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub mode: OperatingMode,
    pub pump: PumpState,
    pub indicator: IndicatorState,
    pub moisture_percent: f32,
    pub temperature_c: f32,
    pub watering_secs: u32,
    pub sensor_fault: bool,
    pub tick_count: u64,
}

impl fmt::Display for TelemetryData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status - mode={} pump={} indicator={} moisture={:.1}% temp={:.1}\u{00b0}C \
             watering={}s sensors={} ticks={}",
            self.mode,
            self.pump,
            self.indicator,
            self.moisture_percent,
            self.temperature_c,
            self.watering_secs,
            if self.sensor_fault { "FAULT" } else { "OK" },
            self.tick_count,
        )
    }
}
