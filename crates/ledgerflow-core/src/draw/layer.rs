//! Layer-based z-ordering for SVG output.
//!
//! Drawables emit SVG nodes tagged with a [`RenderLayer`] so that link ribbons
//! are painted beneath node bars and labels are painted on top of everything,
//! regardless of the order in which elements were rendered.
//!
//! # Example
//!
//! ```
//! # use ledgerflow_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::{Path, Rectangle};
//! let mut output = LayeredOutput::new();
//! output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
//! output.add_to_layer(RenderLayer::Link, Box::new(Path::new()));
//!
//! // One `<g>` per non-empty layer, links first
//! let groups = output.render();
//! assert_eq!(groups.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// Rendering layers, bottom to top.
///
/// The `Ord` derive follows declaration order: the first variant is painted
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Canvas background
    Background,
    /// Link ribbons between nodes
    Link,
    /// Node bars
    Node,
    /// Node labels
    Text,
}

impl RenderLayer {
    /// Returns the value written to the group's `data-layer` attribute.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Link => "link",
            Self::Node => "node",
            Self::Text => "text",
        }
    }
}

/// SVG nodes collected together with their target layer.
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a node to `layer`.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Appends every node of `other`, keeping its layer assignment.
    ///
    /// Within one layer, nodes keep the order in which they were merged.
    pub fn merge(&mut self, other: LayeredOutput) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the output and groups it into one `<g data-layer="...">`
    /// element per non-empty layer, ordered bottom to top.
    pub fn render(mut self) -> Vec<SvgNode> {
        // Stable sort keeps insertion order inside each layer.
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut groups: Vec<SvgNode> = Vec::new();
        let mut current: Option<(RenderLayer, svg_element::Group)> = None;

        for (layer, node) in self.items {
            current = match current.take() {
                Some((current_layer, group)) if current_layer == layer => {
                    Some((layer, group.add(node)))
                }
                finished => {
                    if let Some((_, group)) = finished {
                        groups.push(Box::new(group));
                    }
                    let group = svg_element::Group::new().set("data-layer", layer.name());
                    Some((layer, group.add(node)))
                }
            };
        }

        if let Some((_, group)) = current {
            groups.push(Box::new(group));
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use svg::node::element::Rectangle;

    use super::*;

    #[test]
    fn test_layered_output_is_empty() {
        let mut output = LayeredOutput::new();
        assert!(output.is_empty());
        assert!(LayeredOutput::new().render().is_empty());

        output.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));
        assert!(!output.is_empty());
    }

    #[test]
    fn test_layer_order() {
        assert!(RenderLayer::Background < RenderLayer::Link);
        assert!(RenderLayer::Link < RenderLayer::Node);
        assert!(RenderLayer::Node < RenderLayer::Text);
    }

    #[test]
    fn test_render_sorts_layers_bottom_up() {
        let mut output = LayeredOutput::new();
        output.add_to_layer(RenderLayer::Text, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Link, Box::new(Rectangle::new()));
        output.add_to_layer(RenderLayer::Background, Box::new(Rectangle::new()));

        let rendered: Vec<String> = output
            .render()
            .into_iter()
            .map(|node| node.to_string())
            .collect();

        assert_eq!(rendered.len(), 3);
        assert!(rendered[0].contains(r#"data-layer="background""#));
        assert!(rendered[1].contains(r#"data-layer="link""#));
        assert!(rendered[2].contains(r#"data-layer="text""#));
    }

    #[test]
    fn test_merge_same_layer_shares_group() {
        let mut output1 = LayeredOutput::new();
        output1.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        let mut output2 = LayeredOutput::new();
        output2.add_to_layer(RenderLayer::Node, Box::new(Rectangle::new()));

        output1.merge(output2);

        assert_eq!(output1.render().len(), 1);
    }
}
