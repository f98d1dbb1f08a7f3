//! Shared mutable context threaded through every mode handler.
//!
//! `FsmContext` is the single struct that mode handlers read from and
//! write to.  It holds the settings, the explicit [`ControllerState`], the
//! latest sensor sample, the inputs latched for the current tick and the
//! status events raised while the tick runs.

use core::fmt;

use heapless::Vec;
use log::warn;

use super::OperatingMode;
use crate::app::events::AppEvent;
use crate::config::Settings;

/// Upper bound on status events raised within a single tick.
pub const EVENTS_PER_TICK: usize = 8;

// ---------------------------------------------------------------------------
// Actuator-facing state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PumpState {
    Off,
    On,
}

impl fmt::Display for PumpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

/// What the status indicator should show.  How each state is rendered
/// (colour, blinking) is decided by the indicator driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorState {
    /// Sufficient moisture, nothing to do.
    Normal,
    /// Pump is running.
    Watering,
    /// Soil too dry, or the last auto cycle hit its time cap.
    MoistureAlert,
    /// Sensors are not delivering usable readings.
    Error,
}

impl fmt::Display for IndicatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Watering => write!(f, "Watering"),
            Self::MoistureAlert => write!(f, "MoistureAlert"),
            Self::Error => write!(f, "Error"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor sample
// ---------------------------------------------------------------------------

/// Latest environment reading.  Held between sensor refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSample {
    /// Soil moisture, always within 0–100 %.
    pub moisture_percent: f32,
    /// Ambient air temperature (°C).
    pub temperature_c: f32,
}

impl SensorSample {
    /// Build a sample, clamping moisture into 0–100 %.
    pub fn new(moisture_percent: f32, temperature_c: f32) -> Self {
        Self {
            moisture_percent: moisture_percent.clamp(0.0, 100.0),
            temperature_c,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

/// The full runtime state of the controller as one plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    pub mode: OperatingMode,
    pub pump: PumpState,
    pub indicator: IndicatorState,
    /// Ticks the pump has been running in the current cycle.
    pub watering_secs: u32,
    /// Ticks since the sensors were last sampled.
    pub secs_since_read: u32,
}

impl ControllerState {
    /// `(Auto, PumpOff)`, indicator `Normal`, counters zeroed.
    pub const fn initial() -> Self {
        Self {
            mode: OperatingMode::Auto,
            pump: PumpState::Off,
            indicator: IndicatorState::Normal,
            watering_secs: 0,
            secs_since_read: 0,
        }
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::initial()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every mode handler function.
pub struct FsmContext {
    // -- Configuration --
    pub settings: Settings,

    // -- State --
    pub state: ControllerState,

    // -- Sensor data --
    /// Latest sample.  Updated on the read cadence, otherwise held.
    pub sample: SensorSample,
    /// Set while the moisture sensor is failing.
    pub sensor_fault: bool,

    // -- Per-tick inputs --
    /// Manual watering button fired this tick.
    pub manual_pressed: bool,
    /// The pump was stopped by a mode change earlier in this tick.
    pub forced_stop: bool,

    // -- Outputs --
    /// Status events raised during the current tick, drained by the service.
    pub events: Vec<AppEvent, EVENTS_PER_TICK>,
}

impl FsmContext {
    /// Create a new context in the initial controller state.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: ControllerState::initial(),
            sample: SensorSample::default(),
            sensor_fault: false,
            manual_pressed: false,
            forced_stop: false,
            events: Vec::new(),
        }
    }

    /// Clear the per-tick inputs.  Call before anything else in a tick.
    pub fn begin_tick(&mut self) {
        self.manual_pressed = false;
        self.forced_stop = false;
    }

    /// Queue a status event for the sink.
    pub fn emit(&mut self, event: AppEvent) {
        if let Err(dropped) = self.events.push(event) {
            warn!("event buffer full, dropping: {}", dropped);
        }
    }

    /// Start a watering cycle: pump on, indicator `Watering`, counter reset.
    pub fn start_pump(&mut self) {
        self.state.pump = PumpState::On;
        self.state.indicator = IndicatorState::Watering;
        self.state.watering_secs = 0;
    }

    /// End the current watering cycle and show `indicator`.
    pub fn stop_pump(&mut self, indicator: IndicatorState) {
        self.state.pump = PumpState::Off;
        self.state.indicator = indicator;
    }

    pub fn is_pumping(&self) -> bool {
        self.state.pump == PumpState::On
    }

    /// Soil is below the minimum threshold according to the held sample.
    pub fn is_dry(&self) -> bool {
        self.sample.moisture_percent < self.settings.min_moisture_percent
    }

    /// Soil is above the maximum threshold according to the held sample.
    pub fn is_wet(&self) -> bool {
        self.sample.moisture_percent > self.settings.max_moisture_percent
    }
}
