//! NTC thermistor air-temperature sensor (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage divider with a fixed 10 kOhm resistor and read via a
//! 12-bit ADC.  The simplified Beta (Steinhart-Hart) equation converts
//! resistance to temperature.
//!
//! On the host the ADC is fed by [`AirModel`], a slowly drifting room
//! temperature bounded to 15–40 °C.

use fastrand::Rng;

use crate::error::SensorError;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;

pub const AIR_MIN_C: f32 = 15.0;
pub const AIR_MAX_C: f32 = 40.0;
/// Largest drift per simulated second, in °C.
const DRIFT_PER_SEC: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureSensor;

impl TemperatureSensor {
    pub fn new() -> Self {
        Self
    }

    pub fn adc_to_celsius(&self, raw: u16) -> Result<f32, SensorError> {
        let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
        if voltage <= 0.01 || voltage >= (V_REF - 0.01) {
            return Err(SensorError::Unavailable);
        }
        let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
        let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
        if inv_t <= 0.0 {
            return Err(SensorError::OutOfRange);
        }
        Ok((1.0 / inv_t) - 273.15)
    }

    /// Inverse of [`adc_to_celsius`](Self::adc_to_celsius), used by the
    /// simulated ADC.
    pub fn celsius_to_adc(&self, celsius: f32) -> u16 {
        let t_k = celsius + 273.15;
        let r_ntc = R25 * (BETA * (1.0 / t_k - 1.0 / T25_K)).exp();
        let voltage = V_REF * r_ntc / (R_DIVIDER + r_ntc);
        (voltage / V_REF * ADC_MAX).round().clamp(0.0, ADC_MAX) as u16
    }
}

/// Simulated room air.
#[derive(Debug, Clone)]
pub struct AirModel {
    celsius: f32,
    rng: Rng,
}

impl AirModel {
    pub fn new(initial_c: f32, seed: u64) -> Self {
        Self {
            celsius: initial_c.clamp(AIR_MIN_C, AIR_MAX_C),
            rng: Rng::with_seed(seed),
        }
    }

    pub fn advance(&mut self, dt_secs: f32) {
        let step = (self.rng.f32() * 2.0 - 1.0) * DRIFT_PER_SEC * dt_secs;
        self.celsius = (self.celsius + step).clamp(AIR_MIN_C, AIR_MAX_C);
    }

    pub fn celsius(&self) -> f32 {
        self.celsius
    }
}
