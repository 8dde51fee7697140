//! Node bars.

use svg::node::element as svg_element;

use crate::{
    color::Rgba,
    draw::{Drawable, LayeredOutput, RenderLayer, tooltip},
    geometry::Bounds,
};

/// A filled rectangle representing one chart node.
#[derive(Debug, Clone)]
pub struct Bar {
    bounds: Bounds,
    fill: Rgba,
    tooltip: Option<String>,
}

impl Bar {
    pub fn new(bounds: Bounds, fill: Rgba) -> Self {
        Self {
            bounds,
            fill,
            tooltip: None,
        }
    }

    /// Attaches hover text to the bar.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

impl Drawable for Bar {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut rect = svg_element::Rectangle::new()
            .set("x", self.bounds.min_x())
            .set("y", self.bounds.min_y())
            .set("width", self.bounds.width())
            .set("height", self.bounds.height())
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha())
            .set("class", "node");

        if let Some(text) = &self.tooltip {
            rect = rect.add(tooltip(text));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Node, Box::new(rect));
        output
    }
}
