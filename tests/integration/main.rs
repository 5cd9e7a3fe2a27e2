//! Integration test driver for `tests/integration/` submodule.
//!
//! Closed-loop runs of [`heaterctl::supervisor::HeaterSupervisor`] against a
//! simulated thermal plant. Host only, no hardware.

mod control_loop_tests;
mod mock_plant;
