//! Thermal policy constants
//!
//! The thresholds are a fixed operating policy: they are compiled in and
//! are not read from storage or the command line.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Below this reading the heater is forced ON (°C).
pub const HEATER_ON_THRESHOLD: f32 = 0.0;
/// Above this reading the heater is forced OFF (°C).
pub const HEATER_OFF_THRESHOLD: f32 = 40.0;
/// Below this reading the controller enters safety mode (°C).
pub const CRITICAL_LOW: f32 = -15.0;
/// Above this reading the controller enters safety mode (°C).
pub const CRITICAL_HIGH: f32 = 45.0;
/// Fault code reported by the upstream sensor in place of a temperature.
pub const SENSOR_ERROR_SENTINEL: f32 = 999.0;
/// Match tolerance for [`SENSOR_ERROR_SENTINEL`].
pub const SENSOR_ERROR_TOLERANCE: f32 = 1e-6;

/// Lower edge of the declared operating envelope (°C). Not enforced.
pub const MIN_TEMP: f32 = -20.0;
/// Upper edge of the declared operating envelope (°C). Not enforced.
pub const MAX_TEMP: f32 = 50.0;

/// The complete thermal policy as one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalLimits {
    // --- Control band ---
    pub heater_on_threshold: f32,
    pub heater_off_threshold: f32,

    // --- Safety ---
    pub critical_low: f32,
    pub critical_high: f32,

    // --- Sensor fault ---
    pub sensor_error_sentinel: f32,
    pub sensor_error_tolerance: f32,

    // --- Operating envelope (documentation only) ---
    /// Declared operating minimum. No decision rule reads it: a reading of
    /// -18 °C is already SAFETY_MODE through `critical_low`.
    pub min_temp: f32,
    /// Declared operating maximum. No decision rule reads it.
    pub max_temp: f32,
}

impl ThermalLimits {
    /// The policy the decision function runs against.
    pub const STANDARD: Self = Self {
        heater_on_threshold: HEATER_ON_THRESHOLD,
        heater_off_threshold: HEATER_OFF_THRESHOLD,
        critical_low: CRITICAL_LOW,
        critical_high: CRITICAL_HIGH,
        sensor_error_sentinel: SENSOR_ERROR_SENTINEL,
        sensor_error_tolerance: SENSOR_ERROR_TOLERANCE,
        min_temp: MIN_TEMP,
        max_temp: MAX_TEMP,
    };

    /// Check that the thresholds nest correctly:
    /// `min_temp < critical_low < heater_on < heater_off < critical_high < max_temp`,
    /// and that the sentinel lies outside the critical envelope.
    pub fn validate(&self) -> Result<()> {
        let ladder = [
            self.min_temp,
            self.critical_low,
            self.heater_on_threshold,
            self.heater_off_threshold,
            self.critical_high,
            self.max_temp,
        ];
        if ladder.iter().any(|t| !t.is_finite()) {
            return Err(Error::Config("thresholds must be finite"));
        }
        if ladder.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Config("thresholds out of order"));
        }
        if self.sensor_error_tolerance.is_nan() || self.sensor_error_tolerance <= 0.0 {
            return Err(Error::Config("sentinel tolerance must be positive"));
        }
        if self.sensor_error_sentinel <= self.critical_high
            && self.sensor_error_sentinel >= self.critical_low
        {
            return Err(Error::Config("sentinel inside the critical envelope"));
        }
        Ok(())
    }

    /// Width of the hysteresis band in °C.
    pub fn dead_band_width(&self) -> f32 {
        self.heater_off_threshold - self.heater_on_threshold
    }
}

impl Default for ThermalLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}
