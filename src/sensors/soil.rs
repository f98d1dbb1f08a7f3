//! Capacitive soil-moisture probe.
//!
//! The probe output falls as water content rises.  It is read through a
//! 12-bit ADC and mapped linearly between two calibration points: the
//! count in dry air and the count submerged in water.  A reading pinned to
//! either rail means an open or shorted probe.
//!
//! On the host the ADC is fed by [`SoilModel`], a small physical model of
//! a pot being watered and drying out.

use fastrand::Rng;

use crate::error::SensorError;

pub const ADC_MAX: u16 = 4095;
pub const DEFAULT_DRY_RAW: u16 = 3200;
pub const DEFAULT_WET_RAW: u16 = 1300;

/// Percent per second gained while the pump runs (base + up to `JITTER`).
const WET_RATE_BASE: f32 = 1.8;
const WET_RATE_JITTER: f32 = 0.9;
/// Percent per second lost to evaporation.
const DRY_RATE_BASE: f32 = 0.05;
const DRY_RATE_JITTER: f32 = 0.09;

#[derive(Debug, Clone, Copy)]
pub struct SoilMoistureSensor {
    dry_raw: u16,
    wet_raw: u16,
}

impl SoilMoistureSensor {
    /// `dry_raw` must be above `wet_raw`.
    pub fn new(dry_raw: u16, wet_raw: u16) -> Self {
        Self { dry_raw, wet_raw }
    }

    /// Convert an ADC count to percent, clamped to 0–100.
    pub fn raw_to_percent(&self, raw: u16) -> Result<f32, SensorError> {
        if raw == 0 || raw >= ADC_MAX {
            return Err(SensorError::Unavailable);
        }
        let span = f32::from(self.dry_raw) - f32::from(self.wet_raw);
        if span <= 0.0 {
            return Err(SensorError::OutOfRange);
        }
        let pct = (f32::from(self.dry_raw) - f32::from(raw)) / span * 100.0;
        Ok(pct.clamp(0.0, 100.0))
    }

    /// Inverse mapping, used by the simulated ADC.
    pub fn percent_to_raw(&self, percent: f32) -> u16 {
        let span = f32::from(self.dry_raw) - f32::from(self.wet_raw);
        let raw = f32::from(self.dry_raw) - percent.clamp(0.0, 100.0) / 100.0 * span;
        raw.round().clamp(1.0, f32::from(ADC_MAX - 1)) as u16
    }
}

impl Default for SoilMoistureSensor {
    fn default() -> Self {
        Self::new(DEFAULT_DRY_RAW, DEFAULT_WET_RAW)
    }
}

/// Simulated pot: rises while watered, dries slowly otherwise.
#[derive(Debug, Clone)]
pub struct SoilModel {
    moisture: f32,
    rng: Rng,
}

impl SoilModel {
    pub fn new(initial_percent: f32, seed: u64) -> Self {
        Self {
            moisture: initial_percent.clamp(0.0, 100.0),
            rng: Rng::with_seed(seed),
        }
    }

    /// Advance the model by `dt_secs` with the pump in the given state.
    pub fn advance(&mut self, pump_on: bool, dt_secs: f32) {
        let j = self.rng.f32();
        let delta = if pump_on {
            (WET_RATE_BASE + j * WET_RATE_JITTER) * dt_secs
        } else {
            -(DRY_RATE_BASE + j * DRY_RATE_JITTER) * dt_secs
        };
        self.moisture = (self.moisture + delta).clamp(0.0, 100.0);
    }

    pub fn moisture(&self) -> f32 {
        self.moisture
    }
}
