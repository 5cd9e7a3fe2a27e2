//! Heater actuation decision library.
//!
//! The core is [`control::heater::decide`]: a pure, total function from a
//! temperature reading, the previous heater command and the elapsed
//! timestep to an [`Outcome`]. [`supervisor::HeaterSupervisor`] shows how a
//! control loop threads state through it. The command-line wrapper lives
//! behind the `cli` feature.

#![deny(unused_must_use)]

pub mod config;
pub mod control;
pub mod error;
pub mod supervisor;

#[cfg(feature = "cli")]
pub mod cli;

pub use control::heater::{Decision, HeaterState, Outcome, Reason, decide, evaluate};
pub use error::{Error, Fault, Result};
