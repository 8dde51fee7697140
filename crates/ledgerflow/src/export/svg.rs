//! SVG rendering of a laid-out chart.
//!
//! The document has a fixed canvas size taken from the layout and four
//! groups in back-to-front order: background, link ribbons, node bars and
//! labels. Nodes and links carry `<title>` hover text.

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use ledgerflow_core::{
    color::{ColorError, Rgba},
    draw::{Bar, Drawable, Label, LabelStyle, LayeredOutput, RenderLayer, Ribbon, TextAnchor},
    geometry::{Point, Size},
};

use crate::{chart::SankeyChart, config::StyleConfig, layout::SankeyLayout};

/// Gap between a bar and its label.
const LABEL_GAP: f32 = 6.0;

/// Builds the SVG document for a chart.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    background: Rgba,
    label_style: LabelStyle,
}

impl SvgRenderer {
    pub fn new(background: Rgba, label_style: LabelStyle) -> Self {
        Self {
            background,
            label_style,
        }
    }

    /// Creates a renderer from the style section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ColorError`] if the background or font color is invalid.
    pub fn from_style(style: &StyleConfig) -> Result<Self, ColorError> {
        Ok(Self::new(style.background_color()?, style.label_style()?))
    }

    /// Renders `chart` positioned by `layout`.
    pub fn render(&self, chart: &SankeyChart, layout: &SankeyLayout) -> Document {
        let canvas = layout.canvas();
        let mut output = LayeredOutput::new();

        output.add_to_layer(RenderLayer::Background, Box::new(self.background(canvas)));

        for (link, placement) in chart.links().iter().zip(layout.links()) {
            let ribbon = Ribbon::new(
                placement.source(),
                placement.target(),
                placement.thickness(),
                link.color(),
            )
            .with_tooltip(chart.link_tooltip(link));
            output.merge(ribbon.render_to_layers());
        }

        let last_column = layout.columns().saturating_sub(1);
        for (node, placement) in chart.nodes().iter().zip(layout.nodes()) {
            let bounds = placement.bounds();
            let bar = Bar::new(bounds, node.color()).with_tooltip(node.label());
            output.merge(bar.render_to_layers());

            let (position, anchor) = if placement.column() == last_column && last_column > 0 {
                (
                    Point::new(bounds.min_x() - LABEL_GAP, bounds.center().y()),
                    TextAnchor::End,
                )
            } else {
                (
                    Point::new(bounds.max_x() + LABEL_GAP, bounds.center().y()),
                    TextAnchor::Start,
                )
            };
            let label = Label::new(&self.label_style, node.label(), position, anchor);
            output.merge(label.render_to_layers());
        }

        debug!(
            nodes_count = chart.nodes().len(),
            links_count = chart.links().len();
            "Chart elements drawn"
        );

        let document = output.render().into_iter().fold(
            Document::new()
                .set(
                    "viewBox",
                    format!("0 0 {} {}", canvas.width(), canvas.height()),
                )
                .set("width", canvas.width())
                .set("height", canvas.height()),
            |doc, group| doc.add(group),
        );

        info!(width = canvas.width(), height = canvas.height(); "SVG rendered");
        document
    }

    fn background(&self, canvas: Size) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", canvas.width())
            .set("height", canvas.height())
            .set("fill", &self.background)
            .set("fill-opacity", self.background.alpha())
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new(Rgba::new(255, 255, 255, 1.0), LabelStyle::default())
    }
}
