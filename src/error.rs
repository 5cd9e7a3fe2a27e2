//! Error types for the heater controller.
//!
//! The decision function itself never fails: special conditions are
//! reported as [`Outcome`](crate::control::heater::Outcome) values. The
//! types here cover the edges around it: integer code conversion, the
//! tagged-variant view of an outcome ([`Fault`]), and the supervisor latch.
//! All variants are `Copy` so they can be handed through a control loop
//! without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An integer heater state other than 0 (OFF) or 1 (ON).
    InvalidStateCode(i32),
    /// An integer outside the outcome code table (1, 0, -1, -2).
    InvalidOutcomeCode(i32),
    /// A supervisor reset was requested while the reading is still outside
    /// the critical envelope.
    SafetyLatched,
    /// The thermal policy violates its ordering invariant.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateCode(code) => write!(f, "invalid heater state code {code}"),
            Self::InvalidOutcomeCode(code) => write!(f, "invalid outcome code {code}"),
            Self::SafetyLatched => write!(f, "safety mode still active, reset refused"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Decision faults
// ---------------------------------------------------------------------------

/// The two non-actuation outcomes of a decision, as an error kind.
///
/// `InvalidInput` is transient: skip the cycle and try again with fresh
/// input. `SafetyMode` is a standing condition that needs supervisor-level
/// handling (force the heater off, raise an alarm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    InvalidInput,
    SafetyMode,
}

impl Fault {
    /// Whether the caller may simply retry on the next tick.
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::InvalidInput)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput => write!(f, "invalid input"),
            Self::SafetyMode => write!(f, "safety mode"),
        }
    }
}

impl std::error::Error for Fault {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
