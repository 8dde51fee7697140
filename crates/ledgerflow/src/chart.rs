//! Chart assembly.
//!
//! Resolves a keyed [`FlowGraph`] into the index-based form consumed by the
//! layout and the exporters: an ordered list of [`ChartNode`]s and an
//! ordered list of [`ChartLink`]s that refer to nodes by position.
//!
//! Each node carries a two-line label (`"<name>\n$<value>M"`, value to two
//! decimals) and its category color. Each link takes the color of its
//! *target* node at the configured link alpha.

use log::{debug, trace};

use ledgerflow_core::{
    color::Rgba,
    identifier::Id,
    palette::{Category, Palette},
};

use crate::structure::{FlowGraph, GraphError};

/// Formats a node label: the name, a line break, then the value in millions.
///
/// ```
/// # use ledgerflow::chart::format_label;
/// assert_eq!(format_label("Mac", 9.2), "Mac\n$9.20M");
/// ```
pub fn format_label(name: &str, value: f64) -> String {
    format!("{name}\n${value:.2}M")
}

/// Formats a flow amount for hover text.
pub fn format_amount(value: f64) -> String {
    format!("${value:.2}M")
}

/// A node resolved to its chart position.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartNode {
    key: Id,
    name: String,
    value: f64,
    category: Category,
    label: String,
    color: Rgba,
}

impl ChartNode {
    pub fn key(&self) -> Id {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> Rgba {
        self.color
    }
}

/// A flow resolved to node positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLink {
    source: usize,
    target: usize,
    value: f64,
    color: Rgba,
}

impl ChartLink {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn color(&self) -> Rgba {
        self.color
    }
}

/// Nodes and links ready for layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeyChart {
    nodes: Vec<ChartNode>,
    links: Vec<ChartLink>,
}

impl SankeyChart {
    /// Resolves `graph` into positional nodes and links.
    ///
    /// Node positions follow declaration order. Link colors are the palette
    /// color of the target node's category with `link_alpha` applied.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if a flow endpoint cannot be
    /// resolved, which [`FlowGraph::add_flow`] already prevents.
    pub fn assemble(
        graph: &FlowGraph,
        palette: &Palette,
        link_alpha: f32,
    ) -> Result<Self, GraphError> {
        let nodes: Vec<ChartNode> = graph
            .nodes()
            .map(|(key, spec)| ChartNode {
                key,
                name: spec.name().to_string(),
                value: spec.value(),
                category: spec.category(),
                label: format_label(spec.name(), spec.value()),
                color: palette.color(spec.category()),
            })
            .collect();

        let resolve = |key: Id| {
            graph
                .index_of(key)
                .ok_or_else(|| GraphError::UnknownNode(key.to_string()))
        };

        let links = graph
            .flows()
            .map(|flow| {
                let source = resolve(flow.source())?;
                let target = resolve(flow.target())?;
                Ok(ChartLink {
                    source,
                    target,
                    value: flow.value(),
                    color: nodes[target].color.with_alpha(link_alpha),
                })
            })
            .collect::<Result<Vec<_>, GraphError>>()?;

        debug!(nodes_count = nodes.len(), links_count = links.len(); "Chart assembled");
        trace!(nodes:?, links:?; "Assembled chart");

        Ok(Self { nodes, links })
    }

    pub fn nodes(&self) -> &[ChartNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[ChartLink] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hover text for a link: `"<source> → <target>"` and the amount.
    pub fn link_tooltip(&self, link: &ChartLink) -> String {
        format!(
            "{} → {}\n{}",
            self.nodes[link.source].name,
            self.nodes[link.target].name,
            format_amount(link.value)
        )
    }
}

#[cfg(test)]
mod tests {
    use ledgerflow_core::{color::hex_to_rgba, palette::COST_HEX};

    use super::*;
    use crate::{figures::IncomeStatement, structure::NodeSpec};

    fn reference_chart() -> SankeyChart {
        let graph = IncomeStatement::reference().to_graph().unwrap();
        SankeyChart::assemble(&graph, &Palette::default(), 0.5).unwrap()
    }

    #[test]
    fn test_format_label_two_decimals() {
        assert_eq!(format_label("iPhone", 47.0), "iPhone\n$47.00M");
        assert_eq!(format_label("Revenue", 72.277), "Revenue\n$72.28M");
        assert_eq!(format_label("R & D", 0.010), "R & D\n$0.01M");
    }

    #[test]
    fn test_reference_chart_counts() {
        let chart = reference_chart();
        assert_eq!(chart.nodes().len(), 21);
        assert_eq!(chart.links().len(), 20);
    }

    #[test]
    fn test_every_label_has_two_decimal_value() {
        let chart = reference_chart();

        for node in chart.nodes() {
            let (name, amount) = node.label().split_once('\n').unwrap();
            assert_eq!(name, node.name());

            let digits = amount
                .strip_prefix('$')
                .and_then(|rest| rest.strip_suffix('M'))
                .unwrap();
            let (_, decimals) = digits.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "label {:?}", node.label());
            assert_eq!(digits, format!("{:.2}", node.value()));
        }
    }

    #[test]
    fn test_link_indices_follow_declaration_order() {
        let chart = reference_chart();
        let pairs: Vec<(usize, usize)> = chart
            .links()
            .iter()
            .map(|link| (link.source(), link.target()))
            .collect();

        assert_eq!(
            pairs,
            [
                (0, 4),
                (1, 4),
                (2, 4),
                (3, 4),
                (4, 5),
                (4, 6),
                (5, 7),
                (5, 8),
                (7, 9),
                (7, 10),
                (7, 11),
                (8, 12),
                (8, 13),
                (8, 14),
                (8, 15),
                (8, 16),
                (8, 17),
                (6, 18),
                (6, 19),
                (6, 20),
            ]
        );
    }

    #[test]
    fn test_link_color_follows_target_category() {
        let chart = reference_chart();

        for link in chart.links() {
            let target = &chart.nodes()[link.target()];
            assert_eq!(link.color(), target.color().with_alpha(0.5));
        }

        // Revenue -> COGS is a cost link.
        let cogs_link = chart.links()[5];
        assert_eq!(cogs_link.color(), hex_to_rgba(COST_HEX, 0.5).unwrap());
        assert_eq!(cogs_link.color().to_string(), "rgba(192, 57, 43, 0.5)");
    }

    #[test]
    fn test_link_tooltip() {
        let chart = reference_chart();
        assert_eq!(
            chart.link_tooltip(&chart.links()[17]),
            "COGS → Raw Material\n$37.02M"
        );
    }

    #[test]
    fn test_inserting_a_node_needs_no_renumbering() {
        let mut graph = FlowGraph::new();
        graph
            .add_node("chart_sink", NodeSpec::new("Sink", 1.0, Category::Cost))
            .unwrap();
        graph
            .add_node("chart_source", NodeSpec::new("Source", 1.0, Category::Revenue))
            .unwrap();
        graph.add_flow("chart_source", "chart_sink", 1.0).unwrap();

        let chart = SankeyChart::assemble(&graph, &Palette::default(), 0.5).unwrap();
        assert_eq!(chart.links()[0].source(), 1);
        assert_eq!(chart.links()[0].target(), 0);
        assert_eq!(chart.links()[0].color().channels(), (192, 57, 43));
    }
}
