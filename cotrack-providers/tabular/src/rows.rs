//! Row representations of graph nodes and edges.

use cotrack_core::{Edge, Graph, SpanningForest};

/// One node of the exported graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeRow {
    /// The node's `TrackId`.
    pub id: u32,
    /// The track name.
    pub label: String,
}

/// One weighted edge of an exported graph or forest.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EdgeRow {
    /// Smaller endpoint id.
    pub source: u32,
    /// Larger endpoint id.
    pub target: u32,
    /// Co-occurrence count.
    pub weight: u32,
    /// The weight rendered as text, for viewers that label edges.
    pub label: String,
}

impl From<&Edge> for EdgeRow {
    fn from(edge: &Edge) -> Self {
        Self {
            source: edge.source().get(),
            target: edge.target().get(),
            weight: edge.weight(),
            label: edge.weight().to_string(),
        }
    }
}

/// One row per node, isolated nodes included, in id order.
///
/// # Examples
/// ```
/// use cotrack_core::{CooccurrenceGraphBuilder, Playlist};
/// use cotrack_providers_tabular::node_rows;
///
/// let graph = CooccurrenceGraphBuilder::new().build(&[Playlist::from_iter(["x", "y"])])?;
/// let rows = node_rows(&graph);
/// assert_eq!((rows[1].id, rows[1].label.as_str()), (1, "y"));
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[must_use]
pub fn node_rows(graph: &Graph) -> Vec<NodeRow> {
    graph
        .nodes()
        .map(|(id, name)| NodeRow {
            id: id.get(),
            label: name.to_owned(),
        })
        .collect()
}

/// One row per graph edge, in canonical enumeration order.
#[must_use]
pub fn edge_rows(graph: &Graph) -> Vec<EdgeRow> {
    graph.edges().iter().map(EdgeRow::from).collect()
}

/// One row per forest edge, in acceptance order.
#[must_use]
pub fn forest_rows(forest: &SpanningForest) -> Vec<EdgeRow> {
    forest.edges().iter().map(EdgeRow::from).collect()
}
