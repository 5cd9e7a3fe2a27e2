//! Fuzz target: `evaluate` over raw f32 bit patterns.
//!
//! Input layout: 4 bytes reading, 4 bytes dt, 1 byte previous state (low bit).
//!
//! Invariants checked:
//! - No panics for any reading/dt, NaN and infinities included
//! - A non-positive or NaN dt always wins
//! - Outcome and reason agree
//! - The previous state is only echoed from the dead band
//!
//! cargo fuzz run fuzz_decide

#![no_main]

use heaterctl::{HeaterState, Outcome, Reason, evaluate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((reading, rest)) = data.split_first_chunk::<4>() else {
        return;
    };
    let Some((dt, rest)) = rest.split_first_chunk::<4>() else {
        return;
    };
    let reading = f32::from_le_bytes(*reading);
    let dt = f32::from_le_bytes(*dt);
    let previous = HeaterState::from(rest.first().is_some_and(|b| b & 1 == 1));

    let d = evaluate(reading, previous, dt);

    if !(dt > 0.0) {
        assert_eq!(d.reason, Reason::NonPositiveTimestep);
    }

    match d.reason {
        Reason::NonPositiveTimestep | Reason::SensorFault | Reason::NotANumber => {
            assert_eq!(d.outcome, Outcome::InvalidInput);
        }
        Reason::BelowCriticalLow | Reason::AboveCriticalHigh => {
            assert_eq!(d.outcome, Outcome::SafetyMode);
        }
        Reason::BelowOnThreshold => assert_eq!(d.outcome, Outcome::On),
        Reason::AboveOffThreshold => assert_eq!(d.outcome, Outcome::Off),
        Reason::DeadBand => {
            assert!((0.0..=40.0).contains(&reading));
            assert_eq!(d.outcome, Outcome::from(previous));
        }
    }
});
