//! System configuration parameters
//!
//! [`Settings`] holds the user-tunable watering thresholds; [`SystemConfig`]
//! wraps them together with the loop timing used by the host binary.
//! Values can be overridden from a JSON file at startup.  Any field left
//! out of the file keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_MIN_MOISTURE: f32 = 30.0;
pub const DEFAULT_MAX_MOISTURE: f32 = 70.0;
pub const DEFAULT_MAX_WATERING_SECS: u32 = 30;
pub const DEFAULT_MANUAL_WATERING_SECS: u32 = 10;
pub const DEFAULT_SENSOR_INTERVAL_SECS: u32 = 5;

/// Watering thresholds and durations.
///
/// Durations are counted in control ticks; with the default 1 s loop
/// interval one tick is one second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start auto watering when moisture drops below this (%)
    pub min_moisture_percent: f32,
    /// Stop auto watering when moisture rises above this (%)
    pub max_moisture_percent: f32,
    /// Hard cap on a single auto watering cycle
    pub max_watering_secs: u32,
    /// Length of a manually triggered watering cycle
    pub manual_watering_secs: u32,
    /// How often the sensors are sampled
    pub sensor_read_interval_secs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_moisture_percent: DEFAULT_MIN_MOISTURE,
            max_moisture_percent: DEFAULT_MAX_MOISTURE,
            max_watering_secs: DEFAULT_MAX_WATERING_SECS,
            manual_watering_secs: DEFAULT_MANUAL_WATERING_SECS,
            sensor_read_interval_secs: DEFAULT_SENSOR_INTERVAL_SECS,
        }
    }
}

impl Settings {
    /// Check `0 <= min < max <= 100` and that every duration is non-zero.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_moisture_percent, self.max_moisture_percent);
        if !min.is_finite() || !max.is_finite() {
            return Err(Error::InvalidSettings("moisture thresholds must be finite"));
        }
        if min < 0.0 {
            return Err(Error::InvalidSettings("min moisture must not be negative"));
        }
        if max > 100.0 {
            return Err(Error::InvalidSettings("max moisture must not exceed 100%"));
        }
        if min >= max {
            return Err(Error::InvalidSettings(
                "min moisture must be below max moisture",
            ));
        }
        if self.max_watering_secs == 0 {
            return Err(Error::InvalidSettings("max watering duration must be > 0"));
        }
        if self.manual_watering_secs == 0 {
            return Err(Error::InvalidSettings(
                "manual watering duration must be > 0",
            ));
        }
        if self.sensor_read_interval_secs == 0 {
            return Err(Error::InvalidSettings("sensor read interval must be > 0"));
        }
        Ok(())
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Watering ---
    pub settings: Settings,

    // --- Timing ---
    /// Control loop interval (milliseconds); one tick per interval
    pub control_loop_interval_ms: u32,
    /// Sleep between scheduler polls (milliseconds)
    pub idle_delay_ms: u32,
    /// Status report interval in ticks (0 disables)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),

            // Timing
            control_loop_interval_ms: 1000, // 1 Hz
            idle_delay_ms: 50,
            telemetry_interval_secs: 60, // 1/min
        }
    }
}

impl SystemConfig {
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control loop interval must be > 0"));
        }
        Ok(())
    }
}
