//! Co-occurrence graph construction.
//!
//! Each playlist is first reduced to its sorted, de-duplicated set of
//! [`TrackId`]s. Walking that set with `i < j` yields every unordered pair
//! exactly once, already in canonical `(min, max)` form, so a hash map keyed by
//! the pair gives O(1)-average upserts. The parallel path folds per-worker maps
//! with Rayon and merges them by summation; the merged edge list is sorted by
//! pair key afterwards so the result does not depend on merge order.

use std::{collections::HashMap, sync::Arc};

use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    builder::ExecutionStrategy,
    catalog::{TrackCatalog, TrackId},
    playlist::Playlist,
};

use super::{Edge, Graph};

type PairWeights = HashMap<(TrackId, TrackId), u32>;

/// Builds a [`Graph`] from playlists.
///
/// # Examples
/// ```
/// use cotrack_core::{CooccurrenceGraphBuilder, Playlist};
///
/// let playlists = vec![
///     Playlist::from_iter(["a", "b", "c"]),
///     Playlist::from_iter(["a", "b"]),
///     Playlist::from_iter(["a", "c"]),
/// ];
/// let graph = CooccurrenceGraphBuilder::new().build(&playlists)?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.weight_between_names("a", "b"), Some(2));
/// assert_eq!(graph.weight_between_names("a", "c"), Some(2));
/// assert_eq!(graph.weight_between_names("b", "c"), Some(1));
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CooccurrenceGraphBuilder {
    strategy: ExecutionStrategy,
}

impl CooccurrenceGraphBuilder {
    /// Creates a builder using [`ExecutionStrategy::Auto`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: ExecutionStrategy::Auto,
        }
    }

    /// Overrides the execution strategy.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn execution_strategy(&self) -> ExecutionStrategy { self.strategy }

    /// Builds the co-occurrence graph for `playlists`.
    ///
    /// # Errors
    /// Returns [`crate::CotrackError::BackendUnavailable`] when the parallel
    /// strategy is requested in a build without the `parallel` feature and
    /// [`crate::CotrackError::CatalogOverflow`] when the playlists hold more
    /// distinct tracks than `TrackId` can address.
    #[instrument(
        name = "core.build_graph",
        err,
        skip(self, playlists),
        fields(playlists = playlists.len(), parallel = field::Empty),
    )]
    pub fn build(&self, playlists: &[Playlist]) -> Result<Graph> {
        let parallel = self.strategy.runs_parallel()?;
        Span::current().record("parallel", parallel);

        let mut catalog = TrackCatalog::new();
        let track_sets = playlists
            .iter()
            .map(|playlist| distinct_tracks(&mut catalog, playlist))
            .collect::<Result<Vec<_>>>()?;

        let weights = if parallel {
            parallel_pair_weights(&track_sets)
        } else {
            sequential_pair_weights(&track_sets)
        };

        let mut edges: Vec<Edge> = weights
            .into_iter()
            .map(|((source, target), weight)| Edge {
                source,
                target,
                weight,
            })
            .collect();
        edges.sort_unstable_by_key(Edge::key);

        info!(
            nodes = catalog.len(),
            edges = edges.len(),
            "co-occurrence graph built"
        );
        Ok(Graph::from_sorted_unique(Arc::new(catalog), edges))
    }
}

fn distinct_tracks(catalog: &mut TrackCatalog, playlist: &Playlist) -> Result<Vec<TrackId>> {
    let mut ids = playlist
        .tracks()
        .iter()
        .map(|name| catalog.register(name))
        .collect::<Result<Vec<_>>>()?;
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

fn add_pairs(weights: &mut PairWeights, tracks: &[TrackId]) {
    for (offset, &left) in tracks.iter().enumerate() {
        for &right in tracks.iter().skip(offset + 1) {
            let weight = weights.entry((left, right)).or_insert(0);
            *weight = weight.saturating_add(1);
        }
    }
}

fn sequential_pair_weights(track_sets: &[Vec<TrackId>]) -> PairWeights {
    let mut weights = PairWeights::new();
    for tracks in track_sets {
        add_pairs(&mut weights, tracks);
    }
    weights
}

#[cfg(feature = "parallel")]
fn parallel_pair_weights(track_sets: &[Vec<TrackId>]) -> PairWeights {
    use rayon::prelude::*;

    track_sets
        .par_iter()
        .fold(PairWeights::new, |mut weights, tracks| {
            add_pairs(&mut weights, tracks);
            weights
        })
        .reduce(PairWeights::new, merge_pair_weights)
}

#[cfg(not(feature = "parallel"))]
fn parallel_pair_weights(track_sets: &[Vec<TrackId>]) -> PairWeights {
    sequential_pair_weights(track_sets)
}

#[cfg_attr(
    all(not(feature = "parallel"), not(test)),
    expect(dead_code, reason = "only the Rayon path merges per-worker maps")
)]
fn merge_pair_weights(left: PairWeights, right: PairWeights) -> PairWeights {
    let (mut into, from) = if left.len() >= right.len() {
        (left, right)
    } else {
        (right, left)
    };
    for (key, weight) in from {
        let slot = into.entry(key).or_insert(0);
        *slot = slot.saturating_add(weight);
    }
    into
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn ids(raw: &[u32]) -> Vec<TrackId> {
        raw.iter().copied().map(TrackId::new).collect()
    }

    #[rstest]
    fn add_pairs_emits_each_unordered_pair_once() {
        let mut weights = PairWeights::new();
        add_pairs(&mut weights, &ids(&[0, 1, 2]));
        let mut keys: Vec<(u32, u32)> = weights
            .keys()
            .map(|(left, right)| (left.get(), right.get()))
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec![(0, 1), (0, 2), (1, 2)]);
        assert!(weights.values().all(|&weight| weight == 1));
    }

    #[rstest]
    fn distinct_tracks_collapses_repeats() {
        let mut catalog = TrackCatalog::new();
        let playlist = Playlist::from_iter(["b", "a", "b", "a"]);
        assert_eq!(distinct_tracks(&mut catalog, &playlist), Ok(ids(&[0, 1])));
    }

    #[rstest]
    fn merge_sums_shared_keys() {
        let mut left = PairWeights::new();
        add_pairs(&mut left, &ids(&[0, 1]));
        let mut right = PairWeights::new();
        add_pairs(&mut right, &ids(&[0, 1, 2]));
        let merged = merge_pair_weights(left, right);
        assert_eq!(merged.get(&(TrackId::new(0), TrackId::new(1))), Some(&2));
        assert_eq!(merged.get(&(TrackId::new(1), TrackId::new(2))), Some(&1));
        assert_eq!(merged.len(), 3);
    }
}
