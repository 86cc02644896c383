//! Weighted, undirected co-occurrence graphs.
//!
//! A [`Graph`] owns the [`TrackCatalog`] its node set was drawn from, so every
//! registered track is a node, including tracks without edges. Edges are kept
//! in canonical `(source, target)` order, which doubles as the deterministic
//! enumeration order used to break weight ties in the spanning forest.

mod builder;

use std::{cmp::Ordering, collections::HashSet, sync::Arc};

use crate::{
    Result,
    catalog::{TrackCatalog, TrackId},
    error::CotrackError,
};

pub use self::builder::CooccurrenceGraphBuilder;

/// An undirected edge in canonical form (`source < target`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    source: TrackId,
    target: TrackId,
    weight: u32,
}

impl Edge {
    /// Creates an edge, canonicalizing the endpoint order.
    ///
    /// # Errors
    /// Returns [`CotrackError::SelfLoopEdge`] when both endpoints are the same
    /// track.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::{Edge, TrackId};
    ///
    /// let edge = Edge::new(TrackId::new(4), TrackId::new(1), 7)?;
    /// assert_eq!(edge.source(), TrackId::new(1));
    /// assert_eq!(edge.target(), TrackId::new(4));
    /// assert!(Edge::new(TrackId::new(2), TrackId::new(2), 1).is_err());
    /// # Ok::<(), cotrack_core::CotrackError>(())
    /// ```
    pub fn new(left: TrackId, right: TrackId, weight: u32) -> Result<Self> {
        match left.cmp(&right) {
            Ordering::Less => Ok(Self {
                source: left,
                target: right,
                weight,
            }),
            Ordering::Greater => Ok(Self {
                source: right,
                target: left,
                weight,
            }),
            Ordering::Equal => Err(CotrackError::SelfLoopEdge { track: left }),
        }
    }

    /// Returns the smaller endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> TrackId { self.source }

    /// Returns the larger endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> TrackId { self.target }

    /// Number of playlists containing both endpoints.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u32 { self.weight }

    /// Canonical unordered pair key.
    #[must_use]
    pub const fn key(&self) -> (TrackId, TrackId) {
        (self.source, self.target)
    }
}

/// A node set plus an edge set with at most one edge per unordered pair.
///
/// # Examples
/// ```
/// use cotrack_core::{Edge, Graph, TrackCatalog};
///
/// let mut catalog = TrackCatalog::new();
/// let a = catalog.register("a")?;
/// let b = catalog.register("b")?;
/// catalog.register("lonely")?;
/// let graph = Graph::from_edges(catalog, vec![Edge::new(a, b, 2)?])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges().len(), 1);
/// assert_eq!(graph.weight_between(b, a), Some(2));
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Graph {
    catalog: Arc<TrackCatalog>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Validates `edges` against `catalog` and builds a graph.
    ///
    /// Edges are re-ordered into canonical `(source, target)` order.
    ///
    /// # Errors
    /// Returns [`CotrackError::UnknownTrack`] when an edge references a track
    /// outside the catalog and [`CotrackError::DuplicateEdge`] when two edges
    /// share an unordered pair.
    pub fn from_edges(catalog: TrackCatalog, mut edges: Vec<Edge>) -> Result<Self> {
        let node_count = catalog.len();
        for edge in &edges {
            for track in [edge.source, edge.target] {
                if !catalog.contains(track) {
                    return Err(CotrackError::UnknownTrack { track, node_count });
                }
            }
        }

        edges.sort_unstable_by_key(Edge::key);
        if let Some(pair) = edges.windows(2).find(|pair| pair[0].key() == pair[1].key()) {
            return Err(CotrackError::DuplicateEdge {
                source_track: pair[0].source,
                target_track: pair[0].target,
            });
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            edges,
        })
    }

    /// Builds a graph from edges already known to be canonical, sorted, and
    /// unique.
    pub(crate) fn from_sorted_unique(catalog: Arc<TrackCatalog>, edges: Vec<Edge>) -> Self {
        debug_assert!(edges.windows(2).all(|pair| pair[0].key() < pair[1].key()));
        Self { catalog, edges }
    }

    /// Returns the catalog backing the node set.
    #[must_use]
    #[rustfmt::skip]
    pub fn catalog(&self) -> &TrackCatalog { &self.catalog }

    /// Returns the edges in canonical enumeration order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Number of nodes, isolated ones included.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.catalog.len() }

    /// Iterates over the node set in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = (TrackId, &str)> + '_ {
        self.catalog.iter()
    }

    /// Returns the weight of the edge joining `left` and `right`, if any.
    #[must_use]
    pub fn weight_between(&self, left: TrackId, right: TrackId) -> Option<u32> {
        let key = if left <= right {
            (left, right)
        } else {
            (right, left)
        };
        self.edges
            .binary_search_by_key(&key, Edge::key)
            .ok()
            .and_then(|index| self.edges.get(index))
            .map(Edge::weight)
    }

    /// Returns the weight of the edge joining two named tracks, if any.
    #[must_use]
    pub fn weight_between_names(&self, left: &str, right: &str) -> Option<u32> {
        let left = self.catalog.lookup(left)?;
        let right = self.catalog.lookup(right)?;
        self.weight_between(left, right)
    }

    /// Nodes that are not an endpoint of any edge.
    #[must_use]
    pub fn isolated_nodes(&self) -> Vec<TrackId> {
        let touched: HashSet<TrackId> = self
            .edges
            .iter()
            .flat_map(|edge| [edge.source, edge.target])
            .collect();
        self.catalog
            .iter()
            .map(|(id, _)| id)
            .filter(|id| !touched.contains(id))
            .collect()
    }

    /// Sum of all edge weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|edge| u64::from(edge.weight)).sum()
    }

    /// Returns a graph over the same node set holding only `edges`.
    pub(crate) fn with_edges(&self, edges: Vec<Edge>) -> Self {
        Self::from_sorted_unique(Arc::clone(&self.catalog), edges)
    }
}
