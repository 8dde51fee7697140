//! Ledgerflow - financial flow (Sankey) charts from an income statement.
//!
//! Declares an income statement as a keyed flow graph, lays it out as a
//! Sankey chart and exports it as a self-contained HTML page and/or a PNG
//! image.

pub mod chart;
pub mod config;
pub mod export;
pub mod figures;
pub mod layout;
pub mod structure;

mod error;

pub use ledgerflow_core::{color, draw, geometry, identifier, palette};

pub use error::LedgerflowError;

use std::path::PathBuf;

use log::{debug, info, trace, warn};

use chart::SankeyChart;
use config::{AppConfig, BalanceCheck, OutputConfig};
use export::{Exporter, html::HtmlExporter, png::PngExporter, svg::SvgRenderer};
use figures::IncomeStatement;
use layout::SankeyLayout;

/// Builder for assembling and rendering Ledgerflow charts.
///
/// # Examples
///
/// ```rust,no_run
/// use ledgerflow::{ChartBuilder, config::AppConfig, figures::IncomeStatement};
///
/// let builder = ChartBuilder::new(AppConfig::default());
///
/// let chart = builder
///     .build_chart(&IncomeStatement::reference())
///     .expect("Failed to assemble chart");
///
/// let svg = builder.render_svg(&chart).expect("Failed to render");
/// println!("{svg}");
/// ```
#[derive(Debug, Default)]
pub struct ChartBuilder {
    config: AppConfig,
}

impl ChartBuilder {
    /// Create a new chart builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Declares the statement's flow graph, checks flow balance and
    /// assembles the chart.
    ///
    /// With `validation.balance = "warn"` each imbalance is logged and the
    /// chart is still built; with `"deny"` they are returned as an error.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerflowError::Graph`] for invalid declarations,
    /// [`LedgerflowError::Unbalanced`] when the balance check denies,
    /// and [`LedgerflowError::Color`] for an invalid palette.
    pub fn build_chart(&self, statement: &IncomeStatement) -> Result<SankeyChart, LedgerflowError> {
        info!("Declaring flow graph");
        let graph = statement.to_graph()?;
        debug!(
            nodes_count = graph.nodes_count(),
            flows_count = graph.flows_count();
            "Flow graph declared"
        );

        let validation = self.config.validation();
        match validation.balance() {
            BalanceCheck::Off => debug!("Flow balance check disabled"),
            check => {
                let imbalances = graph.imbalances(validation.tolerance());
                if imbalances.is_empty() {
                    debug!("All internal nodes conserve flow");
                } else if check == BalanceCheck::Deny {
                    return Err(LedgerflowError::Unbalanced(imbalances));
                } else {
                    for imbalance in &imbalances {
                        warn!(
                            node:% = imbalance.node(),
                            difference = imbalance.difference();
                            "Flow imbalance: {imbalance}"
                        );
                    }
                }
            }
        }

        let style = self.config.style();
        let palette = style.palette()?;
        let chart = SankeyChart::assemble(&graph, &palette, style.link_alpha())?;
        info!(
            nodes_count = chart.nodes().len(),
            links_count = chart.links().len();
            "Chart assembled"
        );

        Ok(chart)
    }

    /// Lays out `chart` and renders it to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerflowError::Layout`] if the chart cannot be placed on
    /// the configured canvas, or [`LedgerflowError::Color`] for an invalid
    /// background or font color.
    pub fn render_document(&self, chart: &SankeyChart) -> Result<svg::Document, LedgerflowError> {
        let layout = SankeyLayout::compute(chart, &self.config.layout().layout_options())?;
        info!(columns = layout.columns(); "Layout calculated");
        trace!(layout:?; "Computed layout");

        let renderer = SvgRenderer::from_style(self.config.style())?;
        Ok(renderer.render(chart, &layout))
    }

    /// Renders `chart` to an SVG string.
    ///
    /// # Errors
    ///
    /// See [`ChartBuilder::render_document`].
    pub fn render_svg(&self, chart: &SankeyChart) -> Result<String, LedgerflowError> {
        Ok(self.render_document(chart)?.to_string())
    }

    /// Renders `chart` to a standalone HTML page.
    ///
    /// # Errors
    ///
    /// See [`ChartBuilder::render_document`].
    pub fn render_html(&self, chart: &SankeyChart) -> Result<String, LedgerflowError> {
        let document = self.render_document(chart)?;
        Ok(HtmlExporter::new(self.config.output().name()).render(&document))
    }

    /// Renders `chart` to PNG bytes at the configured raster scale.
    ///
    /// # Errors
    ///
    /// See [`ChartBuilder::render_document`]; rasterization failures are
    /// returned as [`LedgerflowError::Export`].
    pub fn render_png(&self, chart: &SankeyChart) -> Result<Vec<u8>, LedgerflowError> {
        let document = self.render_document(chart)?;
        Ok(PngExporter::new(self.config.layout().scale()).encode(&document)?)
    }

    /// Renders `chart` and writes the artifacts selected by `output`.
    ///
    /// Returns the written paths, HTML first.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerflowError::Export`] if the output directory cannot be
    /// prepared or an artifact cannot be written.
    pub fn export(
        &self,
        chart: &SankeyChart,
        output: &OutputConfig,
    ) -> Result<Vec<PathBuf>, LedgerflowError> {
        let document = self.render_document(chart)?;
        info!(dir:? = output.dir(), format:% = output.format(); "Writing artifacts");
        let written = export::write_artifacts(&document, output, self.config.layout().scale())?;
        Ok(written)
    }
}
