//! Transfer command implementation

use std::fmt::Display;

use i2c_access_core::executor::describe;
use i2c_access_core::{execute, Buffer, Error, I2cBus, TransactionPlan, TransactionSpec};

use crate::cli::Cli;
use crate::report;

/// What a run did
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Validated only, the bus was not touched
    DryRun,
    /// Nothing to write or read, the bus was not touched
    NoTransaction,
    /// Transaction executed; the bytes read (empty without a read)
    Completed(Buffer),
}

/// Validate the command line, then execute it on the bus opened by `open`
pub fn run<B, E, F>(cli: &Cli, open: F) -> Result<Outcome, Error>
where
    B: I2cBus,
    E: Display,
    F: FnOnce(&str) -> Result<B, E>,
{
    let device = cli
        .device
        .as_deref()
        .ok_or(Error::MissingArgument("<i2c-dev-node>"))?;
    let address = cli
        .address
        .as_deref()
        .ok_or(Error::MissingArgument("<addr>"))?;

    let spec = TransactionSpec::parse(device, address, &cli.data, cli.read.as_deref(), cli.force)?;
    let plan = TransactionPlan::build(&spec);
    log::info!(
        "Planned on {} ({} claim): {}",
        spec.device_path(),
        spec.claim_mode(),
        describe(&plan)
    );

    if cli.verbose > 0 {
        report::print_plan(&spec);
    }

    if plan.is_empty() {
        eprintln!("{}", report::EMPTY_NOTICE);
    }

    if cli.dry_run {
        eprintln!("{}", report::DRY_RUN_NOTICE);
        return Ok(Outcome::DryRun);
    }

    if plan.is_empty() {
        return Ok(Outcome::NoTransaction);
    }

    let bytes = execute(
        open,
        spec.device_path(),
        spec.address(),
        spec.claim_mode(),
        plan,
    )?;
    log::info!("Transaction complete, {} byte(s) read", bytes.len());

    Ok(Outcome::Completed(bytes))
}
