//! Sankey layout.
//!
//! Places the nodes of a [`SankeyChart`] in columns and routes each link as
//! a band between its source and target bars.
//!
//! # Algorithm
//!
//! 1. **Columns**: a node's column is the length of the longest path reaching
//!    it from a source node (Kahn's topological order). Cycles are rejected.
//! 2. **Throughput**: a node's bar represents the larger of its incoming and
//!    outgoing link totals, or its declared value when it has no links.
//! 3. **Scale**: one value-to-pixel factor for the whole chart, chosen so the
//!    fullest column (bars plus padding) fits the inner canvas height.
//! 4. **Stacking**: each column is stacked top-down in declaration order and
//!    centred vertically.
//! 5. **Links**: at each bar, outgoing bands are stacked in the vertical order
//!    of their targets and incoming bands in the order of their sources, which
//!    keeps bands from crossing at the bar edges.

use std::collections::VecDeque;

use log::debug;
use thiserror::Error;

use ledgerflow_core::geometry::{Bounds, Insets, Point, Size};

use crate::chart::SankeyChart;

/// Errors raised while laying out a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("chart has no nodes")]
    Empty,

    #[error("flows form a cycle through `{0}`")]
    Cycle(String),

    #[error("canvas {width}x{height} leaves no room inside its margins")]
    DegenerateCanvas { width: u32, height: u32 },
}

/// Geometry settings for the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    canvas: Size,
    margin: Insets,
    pad: f32,
    thickness: f32,
}

impl LayoutOptions {
    /// Creates layout options.
    ///
    /// # Arguments
    ///
    /// * `canvas` - Full canvas size in logical pixels.
    /// * `margin` - Space kept free on each side of the canvas.
    /// * `pad` - Vertical gap between bars in the same column.
    /// * `thickness` - Bar width.
    pub fn new(canvas: Size, margin: Insets, pad: f32, thickness: f32) -> Self {
        Self {
            canvas,
            margin,
            pad,
            thickness,
        }
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn margin(&self) -> Insets {
        self.margin
    }
}

impl Default for LayoutOptions {
    /// 1600x900 canvas, 80px side margins, 40px top and bottom margins,
    /// 40px padding and 40px bars.
    fn default() -> Self {
        Self::new(
            Size::new(1600.0, 900.0),
            Insets::new(40.0, 80.0, 40.0, 80.0),
            40.0,
            40.0,
        )
    }
}

/// A positioned node bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    bounds: Bounds,
    column: usize,
}

impl NodeLayout {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

/// A positioned link band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkLayout {
    source: Point,
    target: Point,
    thickness: f32,
}

impl LinkLayout {
    /// Top corner of the band at the source bar's right edge.
    pub fn source(&self) -> Point {
        self.source
    }

    /// Top corner of the band at the target bar's left edge.
    pub fn target(&self) -> Point {
        self.target
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

/// The computed positions of every node and link of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLayout {
    canvas: Size,
    nodes: Vec<NodeLayout>,
    links: Vec<LinkLayout>,
    columns: usize,
}

impl SankeyLayout {
    /// Lays out `chart` on the canvas described by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] for an empty chart, cyclic flows, or a canvas
    /// whose margins consume all of its area.
    pub fn compute(chart: &SankeyChart, options: &LayoutOptions) -> Result<Self, LayoutError> {
        if chart.is_empty() {
            return Err(LayoutError::Empty);
        }

        let inner = options.canvas.shrink(options.margin);
        if inner.width() <= options.thickness || inner.height() <= 0.0 {
            return Err(LayoutError::DegenerateCanvas {
                width: options.canvas.width() as u32,
                height: options.canvas.height() as u32,
            });
        }
        let origin = Point::new(options.margin.left(), options.margin.top());

        let node_columns = assign_columns(chart)?;
        let columns = node_columns.iter().copied().max().unwrap_or(0) + 1;
        let throughput = throughput(chart);

        let mut column_members: Vec<Vec<usize>> = vec![Vec::new(); columns];
        for (node, column) in node_columns.iter().enumerate() {
            column_members[*column].push(node);
        }

        let max_members = column_members.iter().map(Vec::len).max().unwrap_or(1);
        let pad = if max_members > 1 {
            options.pad.min(inner.height() * 0.5 / (max_members - 1) as f32)
        } else {
            options.pad
        };

        let scale = column_members
            .iter()
            .filter_map(|members| {
                let total: f64 = members.iter().map(|node| throughput[*node]).sum();
                let free = inner.height() - pad * members.len().saturating_sub(1) as f32;
                (total > 0.0).then(|| free / total as f32)
            })
            .fold(f32::INFINITY, f32::min);
        let scale = if scale.is_finite() { scale } else { 0.0 };

        let column_step = if columns > 1 {
            (inner.width() - options.thickness) / (columns - 1) as f32
        } else {
            0.0
        };

        let mut nodes = vec![
            NodeLayout {
                bounds: Bounds::default(),
                column: 0,
            };
            chart.nodes().len()
        ];
        for (column, members) in column_members.iter().enumerate() {
            let heights: Vec<f32> = members
                .iter()
                .map(|node| throughput[*node] as f32 * scale)
                .collect();
            let stack_height: f32 =
                heights.iter().sum::<f32>() + pad * members.len().saturating_sub(1) as f32;

            let x = origin.x() + column as f32 * column_step;
            let mut y = origin.y() + (inner.height() - stack_height) / 2.0;
            for (node, height) in members.iter().zip(heights) {
                nodes[*node] = NodeLayout {
                    bounds: Point::new(x, y).to_bounds(Size::new(options.thickness, height)),
                    column,
                };
                y += height + pad;
            }
        }

        let links = route_links(chart, &nodes, scale);

        debug!(
            columns,
            scale,
            pad;
            "Layout computed"
        );

        Ok(Self {
            canvas: options.canvas,
            nodes,
            links,
            columns,
        })
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// Node positions, indexed like [`SankeyChart::nodes`].
    pub fn nodes(&self) -> &[NodeLayout] {
        &self.nodes
    }

    /// Link positions, indexed like [`SankeyChart::links`].
    pub fn links(&self) -> &[LinkLayout] {
        &self.links
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

/// Longest-path column for every node.
fn assign_columns(chart: &SankeyChart) -> Result<Vec<usize>, LayoutError> {
    let count = chart.nodes().len();
    let mut in_degree = vec![0usize; count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); count];
    for link in chart.links() {
        in_degree[link.target()] += 1;
        successors[link.source()].push(link.target());
    }

    let mut columns = vec![0usize; count];
    let mut queue: VecDeque<usize> = (0..count).filter(|node| in_degree[*node] == 0).collect();
    let mut visited = 0;

    while let Some(node) = queue.pop_front() {
        visited += 1;
        for &next in &successors[node] {
            columns[next] = columns[next].max(columns[node] + 1);
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    if visited < count {
        let stuck = in_degree
            .iter()
            .position(|degree| *degree > 0)
            .map(|node| chart.nodes()[node].name().to_string())
            .unwrap_or_default();
        return Err(LayoutError::Cycle(stuck));
    }

    Ok(columns)
}

/// Value represented by each node's bar.
fn throughput(chart: &SankeyChart) -> Vec<f64> {
    let mut incoming = vec![0.0; chart.nodes().len()];
    let mut outgoing = vec![0.0; chart.nodes().len()];
    let mut linked = vec![false; chart.nodes().len()];
    for link in chart.links() {
        outgoing[link.source()] += link.value();
        incoming[link.target()] += link.value();
        linked[link.source()] = true;
        linked[link.target()] = true;
    }

    chart
        .nodes()
        .iter()
        .enumerate()
        .map(|(i, node)| {
            if linked[i] {
                f64::max(incoming[i], outgoing[i])
            } else {
                node.value()
            }
        })
        .map(|value| value.max(0.0))
        .collect()
}

/// Stacks link bands at both ends of every link.
fn route_links(chart: &SankeyChart, nodes: &[NodeLayout], scale: f32) -> Vec<LinkLayout> {
    let links = chart.links();
    let center_y = |node: usize| nodes[node].bounds.center().y();

    let mut by_source: Vec<usize> = (0..links.len()).collect();
    by_source.sort_by(|a, b| {
        let (a, b) = (&links[*a], &links[*b]);
        (a.source(), center_y(a.target())).partial_cmp(&(b.source(), center_y(b.target())))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut by_target: Vec<usize> = (0..links.len()).collect();
    by_target.sort_by(|a, b| {
        let (a, b) = (&links[*a], &links[*b]);
        (a.target(), center_y(a.source())).partial_cmp(&(b.target(), center_y(b.source())))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let thickness: Vec<f32> = links
        .iter()
        .map(|link| link.value().max(0.0) as f32 * scale)
        .collect();

    let mut source_y = vec![0.0f32; links.len()];
    let mut offsets = vec![0.0f32; nodes.len()];
    for idx in by_source {
        let node = links[idx].source();
        source_y[idx] = nodes[node].bounds.min_y() + offsets[node];
        offsets[node] += thickness[idx];
    }

    let mut target_y = vec![0.0f32; links.len()];
    let mut offsets = vec![0.0f32; nodes.len()];
    for idx in by_target {
        let node = links[idx].target();
        target_y[idx] = nodes[node].bounds.min_y() + offsets[node];
        offsets[node] += thickness[idx];
    }

    links
        .iter()
        .enumerate()
        .map(|(idx, link)| LinkLayout {
            source: Point::new(nodes[link.source()].bounds.max_x(), source_y[idx]),
            target: Point::new(nodes[link.target()].bounds.min_x(), target_y[idx]),
            thickness: thickness[idx],
        })
        .collect()
}
