//! CLI logic for the Ledgerflow chart tool.
//!
//! Loads the configuration, applies command line overrides, renders the
//! income statement and writes the selected artifacts.

pub mod error_adapter;

mod args;
mod config;
mod preview;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use ledgerflow::{
    ChartBuilder, LedgerflowError, config::OutputConfig, figures::IncomeStatement,
};

/// Run the Ledgerflow CLI application
///
/// Renders the income statement and writes the artifacts selected by the
/// configuration and `args`, then opens a preview unless disabled.
///
/// Returns the written artifact paths.
///
/// # Errors
///
/// Returns `LedgerflowError` for:
/// - Configuration loading errors
/// - Flow balance failures when the check is set to deny
/// - Layout errors
/// - Rendering and file I/O errors
pub fn run(args: &Args) -> Result<Vec<PathBuf>, LedgerflowError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    let output = apply_overrides(std::mem::take(app_config.output_mut()), args);
    *app_config.output_mut() = output.clone();

    info!(
        dir:? = output.dir(),
        format:% = output.format(),
        name = output.name();
        "Rendering chart"
    );

    let builder = ChartBuilder::new(app_config);
    let chart = builder.build_chart(&IncomeStatement::reference())?;
    let written = builder.export(&chart, &output)?;

    for path in &written {
        info!(path:? = path; "Chart exported successfully");
    }

    if output.preview() {
        preview::show(&builder, &chart, &written);
    }

    Ok(written)
}

/// Command line flags take precedence over configuration values.
fn apply_overrides(mut output: OutputConfig, args: &Args) -> OutputConfig {
    if let Some(dir) = &args.output_dir {
        output = output.with_dir(dir);
    }
    if let Some(format) = args.format {
        output = output.with_format(format);
    }
    if let Some(name) = &args.name {
        output = output.with_name(name);
    }
    if args.no_preview {
        output = output.with_preview(false);
    }
    output
}
