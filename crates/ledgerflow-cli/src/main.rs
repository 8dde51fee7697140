//! Ledgerflow CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use ledgerflow::LedgerflowError;
use ledgerflow_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match ledgerflow_cli::run(&args) {
        Ok(written) => info!(artifacts_count = written.len(); "Chart rendered"),
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// Unknown level names fall back to `warn`.
fn init_logging(level: &str) {
    let log_level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Ledgerflow");
}

/// Logs one miette report per diagnostic carried by `err`.
fn report(err: &LedgerflowError) {
    let reporter = GraphicalReportHandler::new();
    let reportables = to_reportables(err);
    let count = reportables.len();

    for reportable in reportables {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => error!("{writer}"),
            Err(_) => error!("{reportable}"),
        }
    }

    debug!(count; "Reported errors");
}
