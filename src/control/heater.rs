//! Heater actuation decision.
//!
//! Maps `(reading, previous command, timestep)` to one of four outcomes.
//! Rules are checked in a fixed order and the first match wins:
//!
//! ```text
//!  dt <= 0 or NaN                    ─▶ INVALID_INPUT
//!  reading ≈ 999.0 (± 1e-6)          ─▶ INVALID_INPUT   (sensor fault code)
//!  reading is NaN                    ─▶ INVALID_INPUT
//!  reading < -15.0 or reading > 45.0 ─▶ SAFETY_MODE
//!  reading <   0.0                   ─▶ ON
//!  reading >  40.0                   ─▶ OFF
//!  0.0 <= reading <= 40.0            ─▶ previous command (dead band)
//! ```
//!
//! The function is total: it never panics and never returns `Err`. It has
//! no side effects besides a `trace!` record, holds no state and is safe to
//! call from any thread.

use core::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::ThermalLimits;
use crate::error::{Error, Fault};

// ═══════════════════════════════════════════════════════════════════════════
//  Heater state
// ═══════════════════════════════════════════════════════════════════════════

/// Logical heater command. The caller persists it between decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum HeaterState {
    #[default]
    Off = 0,
    On = 1,
}

impl HeaterState {
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl TryFrom<i32> for HeaterState {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(Error::InvalidStateCode(other)),
        }
    }
}

impl From<HeaterState> for i32 {
    fn from(state: HeaterState) -> Self {
        state as i32
    }
}

impl From<bool> for HeaterState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for HeaterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Outcome
// ═══════════════════════════════════════════════════════════════════════════

/// Result of one decision call.
///
/// `On` and `Off` are actuation commands. `InvalidInput` and `SafetyMode`
/// annotate the call and must not be applied to the heater as-is; branch on
/// the variant (or use [`Outcome::into_result`]) first.
#[must_use = "an outcome must be branched on before actuating the heater"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    On,
    Off,
    InvalidInput,
    SafetyMode,
}

impl Outcome {
    /// Integer code: 1 ON, 0 OFF, -1 invalid input, -2 safety mode.
    pub const fn code(self) -> i32 {
        match self {
            Self::On => 1,
            Self::Off => 0,
            Self::InvalidInput => -1,
            Self::SafetyMode => -2,
        }
    }

    /// The heater command, if this outcome is one.
    pub const fn command(self) -> Option<HeaterState> {
        match self {
            Self::On => Some(HeaterState::On),
            Self::Off => Some(HeaterState::Off),
            Self::InvalidInput | Self::SafetyMode => None,
        }
    }

    pub const fn is_actuation(self) -> bool {
        self.command().is_some()
    }

    /// Split into a command or the fault that replaced it.
    pub const fn into_result(self) -> Result<HeaterState, Fault> {
        match self {
            Self::On => Ok(HeaterState::On),
            Self::Off => Ok(HeaterState::Off),
            Self::InvalidInput => Err(Fault::InvalidInput),
            Self::SafetyMode => Err(Fault::SafetyMode),
        }
    }
}

impl From<HeaterState> for Outcome {
    fn from(state: HeaterState) -> Self {
        match state {
            HeaterState::On => Self::On,
            HeaterState::Off => Self::Off,
        }
    }
}

impl From<Fault> for Outcome {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::InvalidInput => Self::InvalidInput,
            Fault::SafetyMode => Self::SafetyMode,
        }
    }
}

impl TryFrom<i32> for Outcome {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::On),
            0 => Ok(Self::Off),
            -1 => Ok(Self::InvalidInput),
            -2 => Ok(Self::SafetyMode),
            other => Err(Error::InvalidOutcomeCode(other)),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "ON"),
            Self::Off => write!(f, "OFF"),
            Self::InvalidInput => write!(f, "INVALID_INPUT"),
            Self::SafetyMode => write!(f, "SAFETY_MODE"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Reason
// ═══════════════════════════════════════════════════════════════════════════

/// Which rule produced the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// `dt` is zero, negative or NaN.
    NonPositiveTimestep,
    /// The reading is the sensor fault sentinel.
    SensorFault,
    /// The reading is NaN.
    NotANumber,
    BelowCriticalLow,
    AboveCriticalHigh,
    /// Cold: heater forced on.
    BelowOnThreshold,
    /// Hot: heater forced off.
    AboveOffThreshold,
    /// Inside the hysteresis band: previous command kept.
    DeadBand,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveTimestep => write!(f, "timestep not positive"),
            Self::SensorFault => write!(f, "sensor fault sentinel"),
            Self::NotANumber => write!(f, "reading is NaN"),
            Self::BelowCriticalLow => write!(f, "below critical low"),
            Self::AboveCriticalHigh => write!(f, "above critical high"),
            Self::BelowOnThreshold => write!(f, "below heater-on threshold"),
            Self::AboveOffThreshold => write!(f, "above heater-off threshold"),
            Self::DeadBand => write!(f, "inside dead band"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Decision
// ═══════════════════════════════════════════════════════════════════════════

#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub reason: Reason,
}

impl Decision {
    const fn new(outcome: Outcome, reason: Reason) -> Self {
        Self { outcome, reason }
    }
}

/// Evaluate the heater rules and report both the outcome and the rule
/// that produced it.
pub fn evaluate(reading: f32, previous: HeaterState, dt: f32) -> Decision {
    let decision = evaluate_with(&ThermalLimits::STANDARD, reading, previous, dt);
    trace!(
        "heater: T={reading} prev={previous} dt={dt} -> {} ({})",
        decision.outcome,
        decision.reason
    );
    decision
}

/// Heater command for one control tick.
///
/// See the module docs for the rule order.
pub fn decide(reading: f32, previous: HeaterState, dt: f32) -> Outcome {
    evaluate(reading, previous, dt).outcome
}

fn evaluate_with(limits: &ThermalLimits, reading: f32, previous: HeaterState, dt: f32) -> Decision {
    if dt.is_nan() || dt <= 0.0 {
        return Decision::new(Outcome::InvalidInput, Reason::NonPositiveTimestep);
    }
    if (reading - limits.sensor_error_sentinel).abs() < limits.sensor_error_tolerance {
        return Decision::new(Outcome::InvalidInput, Reason::SensorFault);
    }
    if reading.is_nan() {
        return Decision::new(Outcome::InvalidInput, Reason::NotANumber);
    }

    // Strict comparisons: the critical limits themselves are still valid.
    if reading < limits.critical_low {
        return Decision::new(Outcome::SafetyMode, Reason::BelowCriticalLow);
    }
    if reading > limits.critical_high {
        return Decision::new(Outcome::SafetyMode, Reason::AboveCriticalHigh);
    }

    if reading < limits.heater_on_threshold {
        return Decision::new(Outcome::On, Reason::BelowOnThreshold);
    }
    if reading > limits.heater_off_threshold {
        return Decision::new(Outcome::Off, Reason::AboveOffThreshold);
    }

    Decision::new(previous.into(), Reason::DeadBand)
}
