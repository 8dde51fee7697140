//! Graph structure for flow charts.
//!
//! The [`FlowGraph`] is the keyed, order-preserving description of a chart:
//! nodes declared under stable keys and the flows between them. Chart
//! assembly turns it into index-based nodes and links.

mod graph;

pub use graph::{Flow, FlowGraph, GraphError, Imbalance, NodeSpec};
