//! Water pump relay driver.
//!
//! One digital output drives the relay (or MOSFET) coil; high = pump
//! running.  Generic over [`embedded_hal::digital::OutputPin`] so the same
//! driver runs against a real GPIO or the host's simulated pin.
//!
//! ## Safety contract
//!
//! This driver is a dumb actuator.  Run-time limits are enforced by the
//! controller, never here.

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::fsm::context::PumpState;

pub struct PumpDriver<P> {
    pin: P,
    state: PumpState,
    /// Completed on/off cycles since boot.
    cycles: u32,
}

impl<P: OutputPin> PumpDriver<P> {
    /// Takes ownership of the pin and drives it low.
    pub fn new(mut pin: P) -> Self {
        if pin.set_low().is_err() {
            warn!("pump: failed to drive pin low at init");
        }
        Self {
            pin,
            state: PumpState::Off,
            cycles: 0,
        }
    }

    /// Idempotent.
    pub fn on(&mut self) {
        if self.state == PumpState::On {
            return;
        }
        match self.pin.set_high() {
            Ok(()) => {
                self.state = PumpState::On;
                info!("*** PUMP ON  (Watering started) ***");
            }
            Err(_) => warn!("pump: failed to energise relay"),
        }
    }

    /// Idempotent.
    pub fn off(&mut self) {
        if self.state == PumpState::Off {
            return;
        }
        match self.pin.set_low() {
            Ok(()) => {
                self.state = PumpState::Off;
                self.cycles = self.cycles.wrapping_add(1);
                info!("*** PUMP OFF (Watering stopped) ***");
            }
            Err(_) => warn!("pump: failed to release relay"),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::On
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}
