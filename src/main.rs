//! heaterctl: one heater decision from the command line.
//!
//! ```text
//!  heaterctl <current_temp> <prev_state> <dt> [--json] [--verbose]
//!
//!  stdout: 1 ON | 0 OFF | -1 invalid input | -2 safety mode
//!  exit:   0 on a decision, 1 on a usage error
//! ```
#![deny(unused_must_use)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use log::LevelFilter;

use heaterctl::cli::{self, Args};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("heaterctl: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let program = std::env::args().next().unwrap_or_else(|| "heaterctl".to_owned());

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.print()?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(_) => {
            println!("{}", cli::usage(&program));
            return Ok(ExitCode::from(1));
        }
    };

    init_logging(args.verbose);

    let report = cli::execute(&args);
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.code);
    }
    Ok(ExitCode::SUCCESS)
}

// ── Logging ───────────────────────────────────────────────────
//
// stderr only; RUST_LOG overrides the --verbose level.

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
