//! Hardware adapter — bridges peripherals to domain port traits.
//!
//! Owns the [`SensorHub`], the pump and indicator drivers, and both button
//! drivers, exposing them through [`SensorPort`], [`ActuatorPort`] and
//! [`InputPort`].  This is the only module that touches the peripherals.
//! On the host the peripherals are simulated: the pump drives an
//! in-memory pin and the sensor ADCs are fed by the environment model.

use std::sync::Arc;

use crate::app::ports::{ActuatorPort, InputPort, SensorPort};
use crate::drivers::button::{ButtonDriver, ButtonLine, MANUAL_DEBOUNCE_MS, MODE_DEBOUNCE_MS};
use crate::drivers::indicator::IndicatorDriver;
use crate::drivers::led_patterns::Rgb;
use crate::drivers::pump::PumpDriver;
use crate::drivers::sim_pin::SimOutputPin;
use crate::error::SensorError;
use crate::fsm::context::IndicatorState;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct SimulatedHardware {
    sensor_hub: SensorHub,
    pump: PumpDriver<SimOutputPin>,
    led: IndicatorDriver,
    mode_button: ButtonDriver,
    manual_button: ButtonDriver,
}

impl SimulatedHardware {
    pub fn new(sensor_hub: SensorHub) -> Self {
        Self {
            sensor_hub,
            pump: PumpDriver::new(SimOutputPin::new()),
            led: IndicatorDriver::new(),
            mode_button: ButtonDriver::new("mode", ButtonLine::new(), MODE_DEBOUNCE_MS),
            manual_button: ButtonDriver::new("manual", ButtonLine::new(), MANUAL_DEBOUNCE_MS),
        }
    }

    /// Edge register for the mode button's interrupt side.
    pub fn mode_line(&self) -> Arc<ButtonLine> {
        self.mode_button.line()
    }

    /// Edge register for the manual button's interrupt side.
    pub fn manual_line(&self) -> Arc<ButtonLine> {
        self.manual_button.line()
    }

    /// Let `dt_secs` of simulated time pass with the pump as it is now.
    pub fn advance_environment(&mut self, dt_secs: f32) {
        let pumping = self.pump.is_running();
        self.sensor_hub.advance(pumping, dt_secs);
    }

    /// Advance indicator blinking and return the colour on the LED.
    pub fn render_indicator(&mut self, delta_ms: u32) -> Rgb {
        self.led.render(delta_ms)
    }

    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    pub fn pump_cycles(&self) -> u32 {
        self.pump.cycles()
    }

    pub fn indicator(&self) -> Option<IndicatorState> {
        self.led.state()
    }

    pub fn sensors_mut(&mut self) -> &mut SensorHub {
        &mut self.sensor_hub
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimulatedHardware {
    fn read_moisture(&mut self) -> Result<f32, SensorError> {
        self.sensor_hub.read_moisture()
    }

    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.sensor_hub.read_temperature()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for SimulatedHardware {
    fn pump_on(&mut self) {
        self.pump.on();
    }

    fn pump_off(&mut self) {
        self.pump.off();
    }

    fn is_pump_running(&self) -> bool {
        self.pump.is_running()
    }

    fn set_indicator(&mut self, state: IndicatorState) {
        self.led.set_state(state);
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for SimulatedHardware {
    fn is_mode_button_pressed(&mut self) -> bool {
        self.mode_button.poll()
    }

    fn is_manual_button_pressed(&mut self) -> bool {
        self.manual_button.poll()
    }
}
