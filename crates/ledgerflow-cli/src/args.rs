//! Command-line argument definitions for the Ledgerflow CLI.
//!
//! Every output flag is optional; when omitted, the value from the
//! configuration file (or its default) applies.

use std::path::PathBuf;

use clap::Parser;

use ledgerflow::config::OutputFormat;

/// Render the income statement as a Sankey chart
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory the artifacts are written to [default: output]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Artifacts to write: html, png or both [default: both]
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// File stem of the artifacts [default: sankey_chart]
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not open the chart in a browser
    #[arg(long)]
    pub no_preview: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
