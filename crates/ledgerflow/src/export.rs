//! Export functionality for Ledgerflow charts.
//!
//! This module turns a rendered SVG document into files on disk. It is the
//! final stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Income Statement
//!     ↓ to_graph
//! FlowGraph
//!     ↓ assemble
//! SankeyChart
//!     ↓ layout
//! SankeyLayout
//!     ↓ svg
//! svg::Document
//!     ↓ export (this module)
//! <name>.html / <name>.png
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - Builds the SVG document shared by every backend
//! - [`html`] - Self-contained HTML page embedding the SVG inline
//! - [`png`] - Raster image produced with `resvg`
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`LedgerflowError::Export`] at the crate boundary.
//!
//! [`LedgerflowError::Export`]: crate::LedgerflowError::Export

pub mod html;
pub mod png;
pub mod svg;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error, info};

use crate::config::OutputConfig;

/// Abstraction for artifact backends.
///
/// Every backend consumes the same SVG document and writes one file whose
/// extension is given by [`Exporter::extension`].
pub trait Exporter {
    /// File extension without the leading dot.
    fn extension(&self) -> &'static str;

    /// Encodes `document` into the backend's format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the document cannot be converted.
    fn encode(&self, document: &::svg::Document) -> Result<Vec<u8>, Error>;

    /// Encodes `document` and writes it to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if encoding fails, or [`Error::Io`] if
    /// writing the output fails.
    fn export(&self, document: &::svg::Document, path: &Path) -> Result<(), Error> {
        let bytes = self.encode(document)?;
        write_file(path, &bytes)
    }
}

/// Errors that can occur during chart export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

/// Writes every artifact selected by `output` into its directory.
///
/// The directory is created if missing; existing artifacts are overwritten.
/// Returns the written paths, HTML first.
///
/// # Arguments
///
/// * `document` - The rendered chart.
/// * `output` - Directory, file stem and format selection.
/// * `scale` - Raster scale factor for the PNG artifact.
///
/// # Errors
///
/// Returns [`Error::Io`] if the directory cannot be created or a file cannot
/// be written, and [`Error::Render`] if rasterization fails. Artifacts written
/// before the failure are left in place.
pub fn write_artifacts(
    document: &::svg::Document,
    output: &OutputConfig,
    scale: f32,
) -> Result<Vec<PathBuf>, Error> {
    prepare_dir(output.dir())?;

    let mut backends: Vec<Box<dyn Exporter>> = Vec::new();
    if output.format().includes_html() {
        backends.push(Box::new(html::HtmlExporter::new(output.name())));
    }
    if output.format().includes_png() {
        backends.push(Box::new(png::PngExporter::new(scale)));
    }

    let mut written = Vec::with_capacity(backends.len());
    for backend in backends {
        let path = artifact_path(output, backend.extension());
        backend.export(document, &path)?;
        info!(path:? = path; "Artifact written");
        written.push(path);
    }

    Ok(written)
}

/// `<dir>/<name>.<extension>`
pub fn artifact_path(output: &OutputConfig, extension: &str) -> PathBuf {
    output
        .dir()
        .join(format!("{}.{extension}", output.name()))
}

/// Creates `dir` and its parents; succeeds if it already exists.
fn prepare_dir(dir: &Path) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|err| {
        error!(dir:? = dir, err:err; "Failed to create output directory");
        Error::Io(err)
    })?;
    debug!(dir:? = dir; "Output directory ready");
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    fs::write(path, bytes).map_err(|err| {
        error!(path:? = path, err:err; "Failed to write artifact");
        Error::Io(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_artifact_path() {
        let output = OutputConfig::default()
            .with_dir("charts")
            .with_name("q3");

        assert_eq!(
            artifact_path(&output, "html"),
            Path::new("charts").join("q3.html")
        );
    }

    #[test]
    fn test_prepare_dir_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("output");

        prepare_dir(&dir).unwrap();
        prepare_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_write_artifacts_html_only() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputConfig::default()
            .with_dir(root.path())
            .with_format(OutputFormat::Html)
            .with_name("chart");
        let document = ::svg::Document::new().set("viewBox", (0, 0, 10, 10));

        let written = write_artifacts(&document, &output, 2.0).unwrap();
        assert_eq!(written, [root.path().join("chart.html")]);
        assert!(!root.path().join("chart.png").exists());
    }

    #[test]
    fn test_write_artifacts_png_only() {
        let root = tempfile::tempdir().unwrap();
        let output = OutputConfig::default()
            .with_dir(root.path())
            .with_format(OutputFormat::Png)
            .with_name("chart");
        let document = ::svg::Document::new()
            .set("viewBox", (0, 0, 10, 10))
            .set("width", 10)
            .set("height", 10);

        let written = write_artifacts(&document, &output, 2.0).unwrap();
        assert_eq!(written, [root.path().join("chart.png")]);
        assert!(!root.path().join("chart.html").exists());

        let bytes = std::fs::read(&written[0]).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_render_error_display() {
        let err = Error::Render("bad svg".to_string());
        assert_eq!(err.to_string(), "Render error: bad svg");
        assert!(std::error::Error::source(&err).is_none());
    }
}
