//! Heater supervisor.
//!
//! The decision function is stateless; something has to own the previous
//! command and decide what the non-actuation outcomes mean for the real
//! heater. The supervisor runs once per control tick and does that:
//!
//! 1. `On` / `Off` are applied and become the new command.
//! 2. `InvalidInput` skips the cycle; the previous command is retained.
//! 3. `SafetyMode` forces the heater off and sets a latch.
//! 4. While latched every tick returns `Off`, whatever the reading.
//! 5. [`HeaterSupervisor::reset`] clears the latch, but only once the last
//!    decision was a valid reading inside the critical envelope.

use log::{error, info, warn};
use serde::Serialize;

use crate::control::heater::{Decision, HeaterState, Outcome, evaluate};
use crate::error::{Error, Result};

/// Counters since construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SupervisorStats {
    pub steps: u64,
    /// Ticks whose outcome was `InvalidInput`.
    pub skipped: u64,
    /// Transitions into the latched state.
    pub safety_trips: u64,
}

pub struct HeaterSupervisor {
    command: HeaterState,
    latched: bool,
    last: Option<Decision>,
    stats: SupervisorStats,
}

impl HeaterSupervisor {
    pub fn new(initial: HeaterState) -> Self {
        Self {
            command: initial,
            latched: false,
            last: None,
            stats: SupervisorStats::default(),
        }
    }

    /// Run one decision and return the command to drive the heater with.
    pub fn step(&mut self, reading: f32, dt: f32) -> HeaterState {
        let decision = evaluate(reading, self.command, dt);
        self.stats.steps = self.stats.steps.saturating_add(1);
        self.last = Some(decision);

        match decision.outcome {
            Outcome::SafetyMode => {
                if !self.latched {
                    error!("SAFETY MODE LATCHED: T={reading} ({})", decision.reason);
                    self.stats.safety_trips = self.stats.safety_trips.saturating_add(1);
                }
                self.latched = true;
                self.command = HeaterState::Off;
            }
            Outcome::InvalidInput => {
                self.stats.skipped = self.stats.skipped.saturating_add(1);
                warn!("heater cycle skipped: {}", decision.reason);
            }
            Outcome::On | Outcome::Off if self.latched => {
                // Held off until an explicit reset.
                self.command = HeaterState::Off;
            }
            Outcome::On => self.command = HeaterState::On,
            Outcome::Off => self.command = HeaterState::Off,
        }

        self.command
    }

    /// Clear the safety latch.
    ///
    /// Refused unless the most recent decision was an actuation outcome, i.e.
    /// a valid reading back inside the critical envelope. A reset without a
    /// latch is a no-op.
    pub fn reset(&mut self) -> Result<()> {
        if !self.latched {
            return Ok(());
        }
        if !self.last.is_some_and(|d| d.outcome.is_actuation()) {
            warn!("safety reset refused: no valid reading inside the critical envelope");
            return Err(Error::SafetyLatched);
        }
        self.latched = false;
        info!("SAFETY MODE CLEARED");
        Ok(())
    }

    /// Command currently driving the heater.
    pub fn command(&self) -> HeaterState {
        self.command
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Decision from the most recent [`step`](Self::step).
    pub fn last_decision(&self) -> Option<Decision> {
        self.last
    }

    pub fn stats(&self) -> SupervisorStats {
        self.stats
    }
}

impl Default for HeaterSupervisor {
    fn default() -> Self {
        Self::new(HeaterState::Off)
    }
}
