//! Edge significance filtering.

use tracing::{info, instrument};

use crate::{Result, error::CotrackError, graph::Graph};

/// Keeps only edges whose weight is strictly greater than a threshold.
///
/// The node set is never pruned: tracks that lose all their edges stay in
/// the graph and later become singleton trees of the spanning forest.
///
/// # Examples
/// ```
/// use cotrack_core::{CooccurrenceGraphBuilder, EdgeSignificanceFilter, Playlist};
///
/// let playlists = vec![
///     Playlist::from_iter(["a", "b", "c"]),
///     Playlist::from_iter(["a", "b"]),
/// ];
/// let graph = CooccurrenceGraphBuilder::new().build(&playlists)?;
/// let filtered = EdgeSignificanceFilter::new(1)?.apply(&graph);
/// assert_eq!(filtered.edges().len(), 1);
/// assert_eq!(filtered.node_count(), 3);
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EdgeSignificanceFilter {
    min_weight: u32,
}

impl EdgeSignificanceFilter {
    /// Creates a filter that drops edges with `weight <= min_weight`.
    ///
    /// Thresholds above `u32::MAX` are clamped, which drops every edge.
    ///
    /// # Errors
    /// Returns [`CotrackError::InvalidArgument`] when `min_weight` is negative.
    pub fn new(min_weight: i64) -> Result<Self> {
        if min_weight < 0 {
            return Err(CotrackError::InvalidArgument {
                parameter: "min_edge_weight",
                got: min_weight,
            });
        }
        let min_weight = u32::try_from(min_weight).unwrap_or(u32::MAX);
        Ok(Self { min_weight })
    }

    /// Returns the configured threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_weight(&self) -> u32 { self.min_weight }

    /// Returns a graph holding the surviving edges over the same node set.
    #[must_use]
    #[instrument(
        name = "core.significance_filter",
        skip(self, graph),
        fields(edges = graph.edges().len(), min_weight = self.min_weight),
    )]
    pub fn apply(&self, graph: &Graph) -> Graph {
        let retained: Vec<_> = graph
            .edges()
            .iter()
            .filter(|edge| edge.weight() > self.min_weight)
            .copied()
            .collect();
        info!(
            retained = retained.len(),
            dropped = graph.edges().len() - retained.len(),
            "edge significance filter applied"
        );
        graph.with_edges(retained)
    }
}
