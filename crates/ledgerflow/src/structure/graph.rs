//! Keyed flow graph.
//!
//! Nodes are declared under stable [`Id`] keys and flows refer to those keys,
//! so inserting or reordering a node never requires renumbering flows by
//! hand. Integer positions are resolved from declaration order only when the
//! chart is assembled.
//!
//! # Architecture
//!
//! - Nodes live in an [`IndexMap`], which preserves declaration order.
//! - Flows live in a `Vec` in declaration order.
//! - Incoming and outgoing flow indices are tracked per node for traversal
//!   and for the conservation-of-flow check.

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use thiserror::Error;

use ledgerflow_core::{identifier::Id, palette::Category};

/// Errors raised while declaring nodes and flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("flow references undeclared node `{0}`")]
    UnknownNode(String),
}

/// Display data declared for a node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    name: String,
    value: f64,
    category: Category,
}

impl NodeSpec {
    /// Creates a node spec.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name shown in the label.
    /// * `value` - Declared amount, in millions.
    /// * `category` - Semantic grouping that selects the node color.
    pub fn new(name: impl Into<String>, value: f64, category: Category) -> Self {
        Self {
            name: name.into(),
            value,
            category,
        }
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
}

/// A directed, weighted flow between two declared nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flow {
    source: Id,
    target: Id,
    value: f64,
}

impl Flow {
    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A node whose incoming and outgoing flow totals disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Imbalance {
    node: Id,
    name: String,
    incoming: f64,
    outgoing: f64,
}

impl Imbalance {
    pub fn node(&self) -> Id {
        self.node
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn incoming(&self) -> f64 {
        self.incoming
    }

    pub fn outgoing(&self) -> f64 {
        self.outgoing
    }

    /// Outgoing minus incoming.
    pub fn difference(&self) -> f64 {
        self.outgoing - self.incoming
    }
}

impl fmt::Display for Imbalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` receives {:.3} but passes on {:.3} (difference {:+.3})",
            self.name,
            self.incoming,
            self.outgoing,
            self.difference()
        )
    }
}

/// Ordered, keyed node declarations plus the flows between them.
#[derive(Debug, Default)]
pub struct FlowGraph {
    nodes: IndexMap<Id, NodeSpec>,
    flows: Vec<Flow>,
    incoming: HashMap<Id, Vec<usize>>,
    outgoing: HashMap<Id, Vec<usize>>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a node under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if `key` was already declared.
    pub fn add_node(&mut self, key: impl Into<Id>, spec: NodeSpec) -> Result<Id, GraphError> {
        let key = key.into();
        if self.nodes.contains_key(&key) {
            return Err(GraphError::DuplicateNode(key.to_string()));
        }
        self.nodes.insert(key, spec);
        Ok(key)
    }

    /// Adds a flow between two declared nodes and returns its index.
    ///
    /// Self-loops and parallel flows are accepted; the layout rejects cycles.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either endpoint was not declared.
    pub fn add_flow(
        &mut self,
        source: impl Into<Id>,
        target: impl Into<Id>,
        value: f64,
    ) -> Result<usize, GraphError> {
        let (source, target) = (source.into(), target.into());
        for key in [source, target] {
            if !self.nodes.contains_key(&key) {
                return Err(GraphError::UnknownNode(key.to_string()));
            }
        }

        self.flows.push(Flow {
            source,
            target,
            value,
        });
        let idx = self.flows.len() - 1;
        self.outgoing.entry(source).or_default().push(idx);
        self.incoming.entry(target).or_default().push(idx);
        Ok(idx)
    }

    pub fn node(&self, key: Id) -> Option<&NodeSpec> {
        self.nodes.get(&key)
    }

    /// Position of `key` in declaration order.
    pub fn index_of(&self, key: Id) -> Option<usize> {
        self.nodes.get_index_of(&key)
    }

    /// Nodes in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (Id, &NodeSpec)> {
        self.nodes.iter().map(|(key, spec)| (*key, spec))
    }

    pub fn nodes_count(&self) -> usize {
        self.nodes.len()
    }

    /// Flows in declaration order.
    pub fn flows(&self) -> impl Iterator<Item = &Flow> {
        self.flows.iter()
    }

    pub fn flows_count(&self) -> usize {
        self.flows.len()
    }

    /// Nodes without incoming flows, in declaration order.
    pub fn roots(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes
            .keys()
            .copied()
            .filter(|key| !self.incoming.contains_key(key))
    }

    pub fn incoming_flows(&self, key: Id) -> impl Iterator<Item = &Flow> {
        self.flows_at(&self.incoming, key)
    }

    pub fn outgoing_flows(&self, key: Id) -> impl Iterator<Item = &Flow> {
        self.flows_at(&self.outgoing, key)
    }

    fn flows_at<'a>(
        &'a self,
        index: &'a HashMap<Id, Vec<usize>>,
        key: Id,
    ) -> impl Iterator<Item = &'a Flow> {
        index
            .get(&key)
            .into_iter()
            .flatten()
            .map(|idx| &self.flows[*idx])
    }

    /// Internal nodes whose incoming and outgoing totals differ by more than
    /// `tolerance`, in declaration order.
    ///
    /// Sources and sinks are never reported.
    pub fn imbalances(&self, tolerance: f64) -> Vec<Imbalance> {
        self.nodes()
            .filter(|(key, _)| self.incoming.contains_key(key) && self.outgoing.contains_key(key))
            .filter_map(|(key, spec)| {
                let incoming: f64 = self.incoming_flows(key).map(Flow::value).sum();
                let outgoing: f64 = self.outgoing_flows(key).map(Flow::value).sum();
                ((outgoing - incoming).abs() > tolerance).then(|| Imbalance {
                    node: key,
                    name: spec.name().to_string(),
                    incoming,
                    outgoing,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, value: f64) -> NodeSpec {
        NodeSpec::new(name, value, Category::Revenue)
    }

    #[test]
    fn test_graph_new() {
        let graph = FlowGraph::new();

        assert_eq!(graph.nodes_count(), 0);
        assert_eq!(graph.flows_count(), 0);
        assert_eq!(graph.roots().count(), 0);
    }

    #[test]
    fn test_add_node_preserves_declaration_order() {
        let mut graph = FlowGraph::new();
        graph.add_node("graph_c", spec("C", 1.0)).unwrap();
        graph.add_node("graph_a", spec("A", 2.0)).unwrap();
        graph.add_node("graph_b", spec("B", 3.0)).unwrap();

        let names: Vec<&str> = graph.nodes().map(|(_, spec)| spec.name()).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(graph.index_of(Id::new("graph_a")), Some(1));
        assert_eq!(graph.index_of(Id::new("graph_missing")), None);
    }

    #[test]
    fn test_add_node_rejects_duplicate_key() {
        let mut graph = FlowGraph::new();
        graph.add_node("dup", spec("First", 1.0)).unwrap();

        let result = graph.add_node("dup", spec("Second", 2.0));
        assert_eq!(result, Err(GraphError::DuplicateNode("dup".to_string())));
        assert_eq!(graph.node(Id::new("dup")).map(NodeSpec::name), Some("First"));
    }

    #[test]
    fn test_add_flow_rejects_unknown_endpoint() {
        let mut graph = FlowGraph::new();
        graph.add_node("known", spec("Known", 1.0)).unwrap();

        assert_eq!(
            graph.add_flow("known", "unknown_target", 1.0),
            Err(GraphError::UnknownNode("unknown_target".to_string()))
        );
        assert_eq!(
            graph.add_flow("unknown_source", "known", 1.0),
            Err(GraphError::UnknownNode("unknown_source".to_string()))
        );
        assert_eq!(graph.flows_count(), 0);
    }

    #[test]
    fn test_roots_and_traversal() {
        let mut graph = FlowGraph::new();
        let left = graph.add_node("left", spec("Left", 1.0)).unwrap();
        let right = graph.add_node("right", spec("Right", 2.0)).unwrap();
        let total = graph.add_node("total", spec("Total", 3.0)).unwrap();
        graph.add_flow(left, total, 1.0).unwrap();
        graph.add_flow(right, total, 2.0).unwrap();

        let roots: Vec<Id> = graph.roots().collect();
        assert_eq!(roots, [left, right]);

        let incoming: Vec<f64> = graph.incoming_flows(total).map(Flow::value).collect();
        assert_eq!(incoming, [1.0, 2.0]);
        assert_eq!(graph.outgoing_flows(total).count(), 0);
        assert_eq!(graph.outgoing_flows(Id::new("nonexistent")).count(), 0);
    }

    #[test]
    fn test_imbalances_reports_internal_nodes_only() {
        let mut graph = FlowGraph::new();
        let source = graph.add_node("imb_source", spec("Source", 10.0)).unwrap();
        let hub = graph.add_node("imb_hub", spec("Hub", 10.0)).unwrap();
        let sink_a = graph.add_node("imb_sink_a", spec("Sink A", 6.0)).unwrap();
        let sink_b = graph.add_node("imb_sink_b", spec("Sink B", 5.0)).unwrap();
        graph.add_flow(source, hub, 10.0).unwrap();
        graph.add_flow(hub, sink_a, 6.0).unwrap();
        graph.add_flow(hub, sink_b, 5.0).unwrap();

        let imbalances = graph.imbalances(1e-9);
        assert_eq!(imbalances.len(), 1);
        assert_eq!(imbalances[0].node(), hub);
        assert_eq!(imbalances[0].incoming(), 10.0);
        assert_eq!(imbalances[0].outgoing(), 11.0);
        assert_eq!(imbalances[0].difference(), 1.0);
        assert_eq!(
            imbalances[0].to_string(),
            "`Hub` receives 10.000 but passes on 11.000 (difference +1.000)"
        );

        // A loose enough tolerance accepts the difference.
        assert!(graph.imbalances(1.5).is_empty());
    }
}
