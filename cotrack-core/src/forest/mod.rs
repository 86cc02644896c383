//! Maximum spanning forest extraction.
//!
//! This module provides a Kruskal selector running on weight-descending edge
//! order. The sort is stable, so edges of equal weight are considered in the
//! graph's canonical enumeration order, which makes the selected forest fully
//! deterministic. Cycle checks use a union-find with path compression and
//! union by size.

mod union_find;

#[cfg(test)]
mod property;

use std::cmp::Reverse;

use tracing::{debug, info, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    catalog::TrackId,
    error::CotrackError,
    graph::{Edge, Graph},
};

pub(crate) use self::union_find::DisjointSet;

/// The output of a maximum spanning forest computation.
///
/// When the input graph is connected the forest is a maximum spanning tree.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SpanningForest {
    edges: Vec<Edge>,
    node_count: usize,
    component_count: usize,
}

impl SpanningForest {
    /// Returns the selected edges in acceptance order (weight descending).
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Number of nodes the forest spans, isolated ones included.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub const fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Sum of the selected edge weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|edge| u64::from(edge.weight())).sum()
    }

    /// Groups node identifiers by tree.
    ///
    /// Trees are ordered by their smallest member and members are sorted, so
    /// the output does not depend on union order.
    #[must_use]
    pub fn components(&self) -> Vec<Vec<TrackId>> {
        let mut sets = DisjointSet::new(self.node_count);
        for edge in &self.edges {
            sets.union(edge.source().index(), edge.target().index());
        }

        let mut slot_by_root = vec![usize::MAX; self.node_count];
        let mut groups: Vec<Vec<TrackId>> = Vec::with_capacity(self.component_count);
        for (node, raw) in (0..self.node_count).zip(0_u32..) {
            let root = sets.find(node);
            if slot_by_root[root] == usize::MAX {
                slot_by_root[root] = groups.len();
                groups.push(Vec::new());
            }
            groups[slot_by_root[root]].push(TrackId::new(raw));
        }
        groups
    }

    /// Removes the lightest selected edge, splitting one tree in two.
    ///
    /// When several edges share the minimum weight, the one accepted first is
    /// removed. Returns `None` when the forest has no edges.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::{CooccurrenceGraphBuilder, MaximumSpanningForest, Playlist};
    ///
    /// let playlists = vec![
    ///     Playlist::from_iter(["a", "b", "c"]),
    ///     Playlist::from_iter(["a", "b"]),
    /// ];
    /// let graph = CooccurrenceGraphBuilder::new().build(&playlists)?;
    /// let mut forest = MaximumSpanningForest::new().extract(&graph)?;
    /// assert!(forest.is_tree());
    /// let removed = forest.split_weakest_link().expect("forest has edges");
    /// assert_eq!(removed.weight(), 1);
    /// assert_eq!(forest.component_count(), 2);
    /// # Ok::<(), cotrack_core::CotrackError>(())
    /// ```
    pub fn split_weakest_link(&mut self) -> Option<Edge> {
        let weakest = self.edges.iter().map(Edge::weight).min()?;
        let position = self
            .edges
            .iter()
            .position(|edge| edge.weight() == weakest)?;
        let removed = self.edges.remove(position);
        self.component_count += 1;
        debug!(
            source = %removed.source(),
            target = %removed.target(),
            weight = removed.weight(),
            "split forest at weakest link"
        );
        Some(removed)
    }
}

/// Kruskal-style selector producing a maximum-weight spanning forest.
///
/// # Examples
/// ```
/// use cotrack_core::{CooccurrenceGraphBuilder, MaximumSpanningForest, Playlist};
///
/// let playlists = vec![
///     Playlist::from_iter(["A", "B", "C"]),
///     Playlist::from_iter(["A", "B"]),
///     Playlist::from_iter(["A", "C"]),
/// ];
/// let graph = CooccurrenceGraphBuilder::new().build(&playlists)?;
/// let forest = MaximumSpanningForest::new().extract(&graph)?;
/// assert_eq!(forest.edges().len(), 2);
/// assert_eq!(forest.total_weight(), 4);
/// assert!(forest.is_tree());
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MaximumSpanningForest {
    strategy: ExecutionStrategy,
}

impl MaximumSpanningForest {
    /// Creates a selector using [`ExecutionStrategy::Auto`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
        }
    }

    /// Overrides the execution strategy used for the edge sort.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Computes the maximum spanning forest of `graph`.
    ///
    /// # Errors
    /// Returns [`CotrackError::BackendUnavailable`] when the parallel strategy
    /// is requested in a build without the `parallel` feature.
    pub fn extract(&self, graph: &Graph) -> Result<SpanningForest> {
        self.extract_from_edges(graph.node_count(), graph.edges())
    }

    /// Computes the maximum spanning forest over `node_count` nodes.
    ///
    /// `edges` are taken in the order given as the tie-break order for equal
    /// weights.
    ///
    /// # Errors
    /// Returns [`CotrackError::UnknownTrack`] when an edge references a node
    /// id `>= node_count` and [`CotrackError::BackendUnavailable`] when the
    /// parallel strategy is unavailable.
    #[instrument(
        name = "core.spanning_forest",
        err,
        skip(self, edges),
        fields(nodes = node_count, edges = edges.len()),
    )]
    pub fn extract_from_edges(&self, node_count: usize, edges: &[Edge]) -> Result<SpanningForest> {
        let parallel = self.strategy.runs_parallel()?;
        validate_endpoints(node_count, edges)?;

        let mut ordered = edges.to_vec();
        sort_by_weight_descending(&mut ordered, parallel);

        let mut sets = DisjointSet::new(node_count);
        let mut selected = Vec::with_capacity(node_count.saturating_sub(1));
        for edge in ordered {
            if sets.components() <= 1 {
                break;
            }
            if sets.union(edge.source().index(), edge.target().index()) {
                selected.push(edge);
            }
        }

        let forest = SpanningForest {
            edges: selected,
            node_count,
            component_count: sets.components(),
        };
        info!(
            selected = forest.edges.len(),
            components = forest.component_count,
            total_weight = forest.total_weight(),
            "maximum spanning forest extracted"
        );
        Ok(forest)
    }
}

fn validate_endpoints(node_count: usize, edges: &[Edge]) -> Result<()> {
    let unknown = edges
        .iter()
        .flat_map(|edge| [edge.source(), edge.target()])
        .find(|track| track.index() >= node_count);
    match unknown {
        Some(track) => Err(CotrackError::UnknownTrack { track, node_count }),
        None => Ok(()),
    }
}

fn sort_by_weight_descending(edges: &mut [Edge], parallel: bool) {
    if parallel {
        parallel_sort_by_weight_descending(edges);
    } else {
        edges.sort_by_key(|edge| Reverse(edge.weight()));
    }
}

#[cfg(feature = "parallel")]
fn parallel_sort_by_weight_descending(edges: &mut [Edge]) {
    use rayon::slice::ParallelSliceMut;

    // `par_sort_by_key` is stable, preserving enumeration order among ties.
    edges.par_sort_by_key(|edge| Reverse(edge.weight()));
}

#[cfg(not(feature = "parallel"))]
fn parallel_sort_by_weight_descending(edges: &mut [Edge]) {
    edges.sort_by_key(|edge| Reverse(edge.weight()));
}
