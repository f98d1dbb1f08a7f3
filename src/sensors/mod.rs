//! Sensor subsystem: probe drivers and the aggregating [`SensorHub`].
//!
//! The hub owns both sensor drivers plus the simulated environment that
//! feeds their ADCs on the host.  The controller reaches it only through
//! [`SensorPort`](crate::app::ports::SensorPort), implemented by the
//! hardware adapter.

pub mod soil;
pub mod temperature;

use log::{debug, warn};

use crate::error::SensorError;
use soil::{SoilModel, SoilMoistureSensor};
use temperature::{AirModel, TemperatureSensor};

/// Default air temperature at power-up, °C.
pub const DEFAULT_AIR_C: f32 = 26.0;

/// Seed for the simulated environment's noise.
const DEFAULT_SEED: u64 = 0x5EED_1234;

/// Aggregates both probes and their simulated environment.
pub struct SensorHub {
    soil_probe: SoilMoistureSensor,
    air_probe: TemperatureSensor,
    soil: SoilModel,
    air: AirModel,
    /// Fault injection: when set the moisture ADC reads the top rail, as an
    /// unplugged probe would.
    moisture_disconnected: bool,
}

impl SensorHub {
    pub fn new(initial_moisture: f32) -> Self {
        Self::with_seed(initial_moisture, DEFAULT_SEED)
    }

    /// Deterministic per seed so simulation runs are reproducible.
    pub fn with_seed(initial_moisture: f32, seed: u64) -> Self {
        Self {
            soil_probe: SoilMoistureSensor::default(),
            air_probe: TemperatureSensor::new(),
            soil: SoilModel::new(initial_moisture, seed),
            air: AirModel::new(DEFAULT_AIR_C, seed.rotate_left(32)),
            moisture_disconnected: false,
        }
    }

    /// Sample the moisture probe.
    pub fn read_moisture(&mut self) -> Result<f32, SensorError> {
        let raw = if self.moisture_disconnected {
            soil::ADC_MAX
        } else {
            self.soil_probe.percent_to_raw(self.soil.moisture())
        };
        let reading = self.soil_probe.raw_to_percent(raw);
        match reading {
            Ok(pct) => debug!("soil adc={} -> {:.1}%", raw, pct),
            Err(e) => warn!("soil adc={} rejected: {}", raw, e),
        }
        reading
    }

    /// Sample the air thermistor.
    pub fn read_temperature(&mut self) -> Result<f32, SensorError> {
        let raw = self.air_probe.celsius_to_adc(self.air.celsius());
        self.air_probe.adc_to_celsius(raw)
    }

    /// Let simulated time pass: the pot drinks or dries, the air drifts.
    pub fn advance(&mut self, pump_on: bool, dt_secs: f32) {
        self.soil.advance(pump_on, dt_secs);
        self.air.advance(dt_secs);
    }

    pub fn set_moisture_disconnected(&mut self, disconnected: bool) {
        self.moisture_disconnected = disconnected;
    }

    /// True moisture of the simulated pot, bypassing the probe.
    pub fn true_moisture(&self) -> f32 {
        self.soil.moisture()
    }
}
