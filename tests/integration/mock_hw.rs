//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history, serves scripted sensor values, and queues button presses that
//! are consumed on the next poll.

#![allow(dead_code)]

use plantwater::app::events::AppEvent;
use plantwater::app::ports::{ActuatorPort, EventSink, InputPort, SensorPort};
use plantwater::app::service::AppService;
use plantwater::config::{Settings, SystemConfig};
use plantwater::error::SensorError;
use plantwater::fsm::context::IndicatorState;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    PumpOn,
    PumpOff,
    Indicator(IndicatorState),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    /// Value served by `read_moisture`.
    pub moisture: Result<f32, SensorError>,
    pub temperature: Result<f32, SensorError>,
    pub moisture_reads: u32,
    mode_pending: bool,
    manual_pending: bool,
}

impl MockHardware {
    pub fn new(moisture: f32) -> Self {
        Self {
            calls: Vec::new(),
            moisture: Ok(moisture),
            temperature: Ok(22.5),
            moisture_reads: 0,
            mode_pending: false,
            manual_pending: false,
        }
    }

    pub fn set_moisture(&mut self, moisture: f32) {
        self.moisture = Ok(moisture);
    }

    pub fn fail_moisture(&mut self, err: SensorError) {
        self.moisture = Err(err);
    }

    /// Queue a mode-button press for the next poll.
    pub fn press_mode(&mut self) {
        self.mode_pending = true;
    }

    /// Queue a manual-button press for the next poll.
    pub fn press_manual(&mut self) {
        self.manual_pending = true;
    }

    /// Pump level implied by the last pump command.
    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::PumpOn => Some(true),
                ActuatorCall::PumpOff => Some(false),
                ActuatorCall::Indicator(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn last_indicator(&self) -> Option<IndicatorState> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Indicator(s) => Some(*s),
            _ => None,
        })
    }

    pub fn indicator_pushes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Indicator(_)))
            .count()
    }

    pub fn pump_commands(&self) -> Vec<ActuatorCall> {
        self.calls
            .iter()
            .copied()
            .filter(|c| !matches!(c, ActuatorCall::Indicator(_)))
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn read_moisture(&mut self) -> Result<f32, SensorError> {
        self.moisture_reads += 1;
        self.moisture
    }

    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature
    }
}

impl ActuatorPort for MockHardware {
    fn pump_on(&mut self) {
        self.calls.push(ActuatorCall::PumpOn);
    }

    fn pump_off(&mut self) {
        self.calls.push(ActuatorCall::PumpOff);
    }

    fn is_pump_running(&self) -> bool {
        MockHardware::pump_on(self)
    }

    fn set_indicator(&mut self, state: IndicatorState) {
        self.calls.push(ActuatorCall::Indicator(state));
    }
}

impl InputPort for MockHardware {
    fn is_mode_button_pressed(&mut self) -> bool {
        core::mem::take(&mut self.mode_pending)
    }

    fn is_manual_button_pressed(&mut self) -> bool {
        core::mem::take(&mut self.manual_pending)
    }
}

// ── Event recorder ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

pub struct Rig {
    pub app: AppService,
    pub hw: MockHardware,
    pub sink: RecordingSink,
}

impl Rig {
    /// Started controller with default settings.
    pub fn new(moisture: f32) -> Self {
        Self::with_settings(moisture, Settings::default())
    }

    pub fn with_settings(moisture: f32, settings: Settings) -> Self {
        let config = SystemConfig {
            settings,
            ..SystemConfig::default()
        };
        let mut app = AppService::new(&config).expect("valid settings");
        let mut hw = MockHardware::new(moisture);
        let mut sink = RecordingSink::new();
        app.start(&mut hw, &mut sink);
        Self { app, hw, sink }
    }

    pub fn tick(&mut self) {
        self.app.tick(&mut self.hw, &mut self.sink);
    }

    pub fn ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.tick();
        }
    }
}
