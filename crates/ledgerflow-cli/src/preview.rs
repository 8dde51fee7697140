//! Browser preview of the rendered chart.
//!
//! Opens the written HTML artifact with the system's default handler. When
//! no HTML artifact was requested, the page is written to a temporary file
//! that is kept after exit so the browser can still load it.
//!
//! A preview never fails the run: problems are logged as warnings.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use log::{info, warn};

use ledgerflow::{ChartBuilder, LedgerflowError, chart::SankeyChart};

/// Opens the chart in a browser.
pub fn show(builder: &ChartBuilder, chart: &SankeyChart, written: &[PathBuf]) {
    let page = match html_artifact(written) {
        Some(path) => path.to_path_buf(),
        None => match temporary_page(builder, chart) {
            Ok(path) => path,
            Err(err) => {
                warn!(err:% = err; "Could not prepare preview page");
                return;
            }
        },
    };

    match open::that(&page) {
        Ok(()) => info!(path:? = page; "Preview opened"),
        Err(err) => warn!(path:? = page, err:err; "Could not open preview"),
    }
}

/// The first written path with an `.html` extension.
fn html_artifact(written: &[PathBuf]) -> Option<&Path> {
    written
        .iter()
        .map(PathBuf::as_path)
        .find(|path| path.extension().is_some_and(|ext| ext == "html"))
}

fn temporary_page(builder: &ChartBuilder, chart: &SankeyChart) -> Result<PathBuf, LedgerflowError> {
    let html = builder.render_html(chart)?;

    let mut file = tempfile::Builder::new()
        .prefix("ledgerflow-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(html.as_bytes())?;

    let (_, path) = file.keep().map_err(|err| LedgerflowError::Io(err.error))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_artifact_is_preferred() {
        let written = [PathBuf::from("out/chart.html"), PathBuf::from("out/chart.png")];
        assert_eq!(html_artifact(&written), Some(Path::new("out/chart.html")));

        let png_only = [PathBuf::from("out/chart.png")];
        assert_eq!(html_artifact(&png_only), None);
    }

    #[test]
    fn test_temporary_page_is_kept() {
        let builder = ChartBuilder::default();
        let chart = builder
            .build_chart(&ledgerflow::figures::IncomeStatement::reference())
            .unwrap();

        let path = temporary_page(&builder, &chart).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(content.starts_with("<!DOCTYPE html>"));
        assert_eq!(path.extension().unwrap(), "html");
    }
}
