//! Link ribbons.
//!
//! A ribbon is a band of constant thickness that leaves the right edge of a
//! source bar and enters the left edge of a target bar. Both long sides are
//! cubic Bézier curves whose control points sit halfway between the two ends,
//! which keeps the band horizontal where it touches each bar.

use svg::node::element as svg_element;

use crate::{
    color::Rgba,
    draw::{Drawable, LayeredOutput, RenderLayer, tooltip},
    geometry::Point,
};

/// A curved band connecting two node edges.
#[derive(Debug, Clone)]
pub struct Ribbon {
    /// Top corner where the band leaves the source bar
    source: Point,
    /// Top corner where the band enters the target bar
    target: Point,
    thickness: f32,
    fill: Rgba,
    tooltip: Option<String>,
}

impl Ribbon {
    pub fn new(source: Point, target: Point, thickness: f32, fill: Rgba) -> Self {
        Self {
            source,
            target,
            thickness,
            fill,
            tooltip: None,
        }
    }

    /// Attaches hover text to the ribbon.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Returns the SVG path data outlining the band.
    pub fn path_data(&self) -> String {
        let (x0, y0) = (self.source.x(), self.source.y());
        let (x1, y1) = (self.target.x(), self.target.y());
        let xm = (x0 + x1) / 2.0;
        let t = self.thickness;

        format!(
            "M {x0} {y0} C {xm} {y0}, {xm} {y1}, {x1} {y1} \
             L {x1} {} C {xm} {}, {xm} {}, {x0} {} Z",
            y1 + t,
            y1 + t,
            y0 + t,
            y0 + t,
        )
    }
}

impl Drawable for Ribbon {
    fn render_to_layers(&self) -> LayeredOutput {
        let mut path = svg_element::Path::new()
            .set("d", self.path_data())
            .set("fill", &self.fill)
            .set("fill-opacity", self.fill.alpha())
            .set("class", "link");

        if let Some(text) = &self.tooltip {
            path = path.add(tooltip(text));
        }

        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Link, Box::new(path));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_data_closes_band() {
        let ribbon = Ribbon::new(
            Point::new(0.0, 10.0),
            Point::new(100.0, 50.0),
            5.0,
            Rgba::new(192, 57, 43, 0.5),
        );

        assert_eq!(
            ribbon.path_data(),
            "M 0 10 C 50 10, 50 50, 100 50 L 100 55 C 50 55, 50 15, 0 15 Z"
        );
    }

    #[test]
    fn test_ribbon_renders_on_link_layer_with_opacity() {
        let ribbon = Ribbon::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            2.0,
            Rgba::new(192, 57, 43, 0.5),
        )
        .with_tooltip("COGS → Raw Material");

        let svg = ribbon.render_to_layers().render()[0].to_string();
        assert!(svg.contains(r#"data-layer="link""#));
        assert!(svg.contains(r#"fill="rgb(192, 57, 43)""#));
        assert!(svg.contains(r#"fill-opacity="0.5""#));
        assert!(svg.contains("COGS → Raw Material"));
    }

    #[test]
    fn test_ribbon_descending_to_target() {
        let ribbon = Ribbon::new(
            Point::new(0.0, 30.0),
            Point::new(100.0, 10.0),
            5.0,
            Rgba::new(0, 0, 0, 1.0),
        );

        let data = ribbon.path_data();
        assert!(data.starts_with("M 0 30 C 50 30, 50 10, 100 10"));
        assert!(data.contains("L 100 15"));
        assert!(data.ends_with("0 35 Z"));
    }
}
