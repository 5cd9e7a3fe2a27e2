//! Control laws.
//!
//! [`heater`] holds the heater actuation decision: a pure function of the
//! latest reading, the previous command and the timestep.

pub mod heater;

pub use heater::{Decision, HeaterState, Outcome, Reason, decide, evaluate};
