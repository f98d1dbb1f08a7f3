//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the mode table engine and the shared context.
//! It exposes a clean, hardware-agnostic API.  All I/O flows through
//! port traits injected at call sites, making the entire service
//! testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   InputPort ──▶ │       AppService       │
//! ActuatorPort ◀──│   Auto/Manual · pump   │
//!                 └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::{Settings, SystemConfig};
use crate::error::{Result, SensorError};
use crate::fsm::context::{ControllerState, FsmContext, PumpState, SensorSample};
use crate::fsm::states::build_mode_table;
use crate::fsm::{self, Fsm};

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, InputPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Last pump command actually sent to the actuator.
    commanded_pump: PumpState,
    tick_count: u64,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Fails with [`Error::InvalidSettings`](crate::error::Error) if the
    /// watering settings violate their invariants.  Does **not** touch any
    /// hardware; call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Result<Self> {
        config.validate()?;
        let mut ctx = FsmContext::new(config.settings);
        ctx.state = fsm::init(&config.settings)?;

        Ok(Self {
            fsm: Fsm::new(build_mode_table()),
            ctx,
            commanded_pump: PumpState::Off,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring the controller up: pump off, one sensor read so the first
    /// tick acts on real data, initial indicator pushed.
    pub fn start(&mut self, hw: &mut (impl SensorPort + ActuatorPort), sink: &mut impl EventSink) {
        hw.pump_off();
        self.commanded_pump = pump_feedback(hw);

        self.refresh_sensors(hw);
        self.fsm.start(&mut self.ctx);
        self.ctx.emit(AppEvent::Started(self.ctx.state.mode));

        hw.set_indicator(self.ctx.state.indicator);
        self.flush_events(sink);
        info!("AppService started in {}", self.ctx.state.mode);
    }

    /// Switch the pump off on the way out.
    pub fn shutdown(&mut self, hw: &mut impl ActuatorPort) {
        if self.commanded_pump == PumpState::On {
            info!("shutdown with pump running, switching it off");
        }
        hw.pump_off();
        self.commanded_pump = pump_feedback(hw);
        self.ctx.state.pump = PumpState::Off;
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle:
    /// mode button → sensor refresh → mode rules → actuators → indicator.
    ///
    /// The `hw` parameter satisfies every hardware port at once; this
    /// avoids a double mutable borrow while keeping the port boundary
    /// explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort + InputPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.begin_tick();

        // 1. Mode toggle
        if hw.is_mode_button_pressed() {
            self.fsm.toggle_mode(&mut self.ctx);
        }

        // 2. Sensor cadence
        self.ctx.state.secs_since_read += 1;
        if self.ctx.state.secs_since_read >= self.ctx.settings.sensor_read_interval_secs {
            self.ctx.state.secs_since_read = 0;
            self.refresh_sensors(hw);
        }

        // 3. Mode rules
        self.ctx.manual_pressed = hw.is_manual_button_pressed();
        self.fsm.tick(&mut self.ctx);

        // 4. Pump command on change, indicator every tick
        self.apply_pump(hw);
        hw.set_indicator(self.ctx.state.indicator);

        debug!(
            "tick {} | {} pump={} indicator={} watering={}s",
            self.tick_count,
            self.ctx.state.mode,
            self.ctx.state.pump,
            self.ctx.state.indicator,
            self.ctx.state.watering_secs
        );

        self.flush_events(sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Copy of the controller state.
    pub fn state(&self) -> ControllerState {
        self.ctx.state
    }

    /// The sample the mode rules last acted on.
    pub fn sample(&self) -> SensorSample {
        self.ctx.sample
    }

    pub fn settings(&self) -> &Settings {
        &self.ctx.settings
    }

    /// Whether the moisture sensor is currently failing.
    pub fn sensor_fault(&self) -> bool {
        self.ctx.sensor_fault
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Build a status snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.ctx.state.mode,
            pump: self.ctx.state.pump,
            indicator: self.ctx.state.indicator,
            moisture_percent: self.ctx.sample.moisture_percent,
            temperature_c: self.ctx.sample.temperature_c,
            watering_secs: self.ctx.state.watering_secs,
            sensor_fault: self.ctx.sensor_fault,
            tick_count: self.tick_count,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Sample both sensors.  A moisture failure keeps the previous sample
    /// and raises the fault; a temperature failure only keeps the previous
    /// temperature.
    fn refresh_sensors(&mut self, hw: &mut impl SensorPort) {
        let moisture = hw.read_moisture().and_then(|m| {
            if m.is_finite() {
                Ok(m)
            } else {
                Err(SensorError::OutOfRange)
            }
        });

        let temperature = match hw.read_temperature() {
            Ok(t) if t.is_finite() => t,
            Ok(_) | Err(_) => {
                warn!("temperature read failed, holding last value");
                self.ctx.sample.temperature_c
            }
        };

        match moisture {
            Ok(m) => {
                self.ctx.sample = SensorSample::new(m, temperature);
                if self.ctx.sensor_fault {
                    self.ctx.sensor_fault = false;
                    info!("moisture sensor recovered");
                    self.ctx.emit(AppEvent::SensorRecovered);
                }
                self.ctx.emit(AppEvent::SensorsRead {
                    moisture_percent: self.ctx.sample.moisture_percent,
                    temperature_c: self.ctx.sample.temperature_c,
                });
            }
            Err(e) => {
                self.ctx.sample.temperature_c = temperature;
                if self.ctx.sensor_fault {
                    debug!("moisture sensor still failing: {}", e);
                } else {
                    self.ctx.sensor_fault = true;
                    warn!("moisture read failed: {}", e);
                    self.ctx.emit(AppEvent::SensorFault(e));
                }
            }
        }
    }

    /// Translate the pump state into a port call when it changed.
    ///
    /// The relay is read back afterwards; a command that did not take is
    /// sent again on the next tick.
    fn apply_pump(&mut self, hw: &mut impl ActuatorPort) {
        let wanted = self.ctx.state.pump;
        if wanted == self.commanded_pump {
            return;
        }
        match wanted {
            PumpState::On => hw.pump_on(),
            PumpState::Off => hw.pump_off(),
        }
        self.commanded_pump = pump_feedback(hw);
        if self.commanded_pump != wanted {
            warn!("pump did not follow {} command, retrying next tick", wanted);
        }
    }

    fn flush_events(&mut self, sink: &mut impl EventSink) {
        for event in &self.ctx.events {
            sink.emit(event);
        }
        self.ctx.events.clear();
    }
}

fn pump_feedback(hw: &impl ActuatorPort) -> PumpState {
    if hw.is_pump_running() {
        PumpState::On
    } else {
        PumpState::Off
    }
}
