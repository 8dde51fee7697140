//! Drawing primitives for Sankey charts.
//!
//! Every primitive knows its own position and implements [`Drawable`],
//! producing SVG nodes sorted into [`RenderLayer`]s.
//!
//! - [`Bar`] - a filled node rectangle
//! - [`Ribbon`] - a curved band connecting two node edges
//! - [`Label`] - multi-line text with a [`LabelStyle`]

mod bar;
mod layer;
mod ribbon;
mod text;

pub use bar::Bar;
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use ribbon::Ribbon;
pub use text::{Label, LabelStyle, TextAnchor};

use svg::node::{Node as _, Text as SvgText, element as svg_element};

/// A positioned element that renders itself into layered SVG output.
pub trait Drawable: std::fmt::Debug {
    /// Renders the element, assigning each SVG node to its layer.
    fn render_to_layers(&self) -> LayeredOutput;
}

/// Builds an SVG `<title>` element, which browsers show as a hover tooltip.
fn tooltip(content: &str) -> svg_element::Element {
    let mut title = svg_element::Element::new("title");
    title.append(SvgText::new(content));
    title
}
