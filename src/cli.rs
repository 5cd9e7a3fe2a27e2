//! Command-line front end.
//!
//! `heaterctl <current_temp> <prev_state> <dt>` prints the outcome code as a
//! single integer. Numbers are read the way C's `atof`/`atoi` read them:
//! leading whitespace is skipped, the longest numeric prefix is used and
//! text with no numeric prefix reads as zero. Anything ignored is reported
//! at `warn` level on stderr, so stdout only ever carries the result.

use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use crate::control::heater::{HeaterState, Outcome, Reason, evaluate};

#[derive(Debug, Parser)]
#[command(name = "heaterctl", version, about = "Heater actuation decision for one control tick")]
pub struct Args {
    /// Current temperature reading (°C)
    #[arg(allow_hyphen_values = true)]
    pub current_temp: String,

    /// Previous heater command: 0 = OFF, 1 = ON
    #[arg(allow_hyphen_values = true)]
    pub prev_state: String,

    /// Timestep since the previous decision (s), must be positive
    #[arg(allow_hyphen_values = true)]
    pub dt: String,

    /// Print a JSON object instead of the bare code
    #[arg(long)]
    pub json: bool,

    /// Raise log verbosity (repeatable)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Printed on stdout when the argument count is wrong.
pub fn usage(program: &str) -> String {
    format!("Usage: {program} <current_temp> <prev_state> <dt>")
}

/// One decision as printed by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub code: i32,
    pub reason: String,
}

/// Parse the arguments and run one decision.
pub fn execute(args: &Args) -> Report {
    let reading = parse_float("current_temp", &args.current_temp);
    let prev_code = parse_int("prev_state", &args.prev_state);
    let dt = parse_float("dt", &args.dt);

    // Rules 1-5 never read the previous state, so an unrepresentable code
    // only matters once the reading lands in the dead band.
    let previous = HeaterState::try_from(prev_code);
    let d = evaluate(reading, previous.unwrap_or_default(), dt);

    match previous {
        Err(e) if d.reason == Reason::DeadBand => {
            warn!("prev_state: {e}");
            Report {
                outcome: Outcome::InvalidInput,
                code: Outcome::InvalidInput.code(),
                reason: e.to_string(),
            }
        }
        _ => {
            info!("T={reading} prev={prev_code} dt={dt} -> {} ({})", d.outcome, d.reason);
            Report {
                outcome: d.outcome,
                code: d.outcome.code(),
                reason: d.reason.to_string(),
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// C-compatible number parsing
// ───────────────────────────────────────────────────────────────

/// `atof`-style read of `text`: longest float prefix, else 0.
pub fn parse_float(name: &str, text: &str) -> f32 {
    match float_prefix(text) {
        Some((value, used)) => {
            if used < text.len() {
                warn!("{name}: ignoring trailing {:?}", &text[used..]);
            }
            value
        }
        None => {
            warn!("{name}: {text:?} is not a number, using 0");
            0.0
        }
    }
}

/// `atoi`-style read of `text`: longest integer prefix, else 0.
/// Out-of-range values saturate.
pub fn parse_int(name: &str, text: &str) -> i32 {
    match int_prefix(text) {
        Some((value, used)) => {
            if used < text.len() {
                warn!("{name}: ignoring trailing {:?}", &text[used..]);
            }
            value
        }
        None => {
            warn!("{name}: {text:?} is not an integer, using 0");
            0
        }
    }
}

/// Value and byte length of the longest float prefix of `text`, including
/// skipped leading whitespace.
fn float_prefix(text: &str) -> Option<(f32, usize)> {
    let start = text.len() - text.trim_start().len();
    let bytes = text.as_bytes();
    let mut i = start;

    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }

    // inf / infinity / nan
    let rest = &bytes[i..];
    for word in ["infinity", "inf", "nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            let end = i + word.len();
            return text[start..end].parse::<f32>().ok().map(|v| (v, end));
        }
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    text[start..i].parse::<f32>().ok().map(|v| (v, i))
}

fn int_prefix(text: &str) -> Option<(i32, usize)> {
    let start = text.len() - text.trim_start().len();
    let bytes = text.as_bytes();
    let mut i = start;

    let negative = match bytes.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let digits = count_digits(&bytes[i..]);
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for &b in &bytes[i..i + digits] {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        value = -value;
    }
    let value = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some((value, i + digits))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
