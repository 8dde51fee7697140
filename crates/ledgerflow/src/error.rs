//! Error types for Ledgerflow operations.
//!
//! [`LedgerflowError`] wraps every failure of the pipeline, from declaring
//! the flow graph through writing artifacts.

use std::io;

use thiserror::Error;

use ledgerflow_core::color::ColorError;

use crate::{
    layout::LayoutError,
    structure::{GraphError, Imbalance},
};

/// The main error type for Ledgerflow operations.
#[derive(Debug, Error)]
pub enum LedgerflowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    /// Internal nodes whose incoming and outgoing totals disagree.
    #[error("{} node(s) do not conserve flow", .0.len())]
    Unbalanced(Vec<Imbalance>),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<crate::export::Error> for LedgerflowError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl From<LayoutError> for LedgerflowError {
    fn from(error: LayoutError) -> Self {
        Self::Layout(error.to_string())
    }
}
