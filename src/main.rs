//! i2c-access - Single-shot I2C transactions from the command line
//!
//! Writes up to 255 bytes to a 7-bit I2C address and/or reads up to 255
//! bytes back, as one combined transaction (the write and the read are
//! separated by a repeated START, not a STOP). Bytes read are printed as
//! space-separated hex values.
//!
//! # Architecture
//!
//! - `i2c-access-core` validates the arguments, builds the message list and
//!   drives it through a bus backend
//! - `i2c-access-linux` is the backend for Linux `/dev/i2c-N` nodes

mod cli;
mod report;
mod transfer;

use clap::{CommandFactory, Parser};
use cli::Cli;
use i2c_access_core::Error;
use i2c_access_linux::LinuxI2c;
use std::process::ExitCode;
use transfer::Outcome;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger, -v raises the default level
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match transfer::run(&cli, LinuxI2c::open) {
        Ok(Outcome::Completed(bytes)) => {
            report::print_read(&bytes);
            ExitCode::SUCCESS
        }
        Ok(Outcome::DryRun) | Ok(Outcome::NoTransaction) => ExitCode::SUCCESS,
        Err(e) => {
            if let Error::MissingArgument(_) = e {
                eprintln!("{}", Cli::command().render_help());
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
