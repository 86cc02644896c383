//! End-to-end orchestration of the co-occurrence pipeline.
//!
//! Provides the [`Pipeline`] runtime entry point which reads playlists from a
//! [`PlaylistSource`], canonicalizes names, filters unpopular tracks, builds
//! the co-occurrence graph, drops insignificant edges and extracts the
//! maximum spanning forest.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::{EmptyCorpusPolicy, ExecutionStrategy},
    catalog::NameNormalization,
    error::CotrackError,
    forest::{MaximumSpanningForest, SpanningForest},
    graph::{CooccurrenceGraphBuilder, Graph},
    playlist::{Playlist, PlaylistSource},
    popularity::PopularityFilter,
    significance::EdgeSignificanceFilter,
};

/// Counters describing one pipeline run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PipelineStats {
    /// Playlists fed to graph construction after applying the playlist limit.
    pub playlists_read: usize,
    /// Playlists within the limit left without tracks by the popularity filter.
    pub playlists_emptied: usize,
    /// Distinct tracks across the whole source before popularity filtering.
    pub tracks_before_filter: usize,
    /// Distinct tracks after popularity filtering; the graph's node count.
    pub tracks_after_filter: usize,
    /// Edges in the unfiltered co-occurrence graph.
    pub edges_before_filter: usize,
    /// Edges surviving the significance filter.
    pub edges_after_filter: usize,
    /// Edges selected into the spanning forest.
    pub forest_edges: usize,
    /// Trees in the spanning forest.
    pub components: usize,
    /// Sum of the forest edge weights.
    pub forest_weight: u64,
}

/// Result of [`Pipeline::run`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PipelineOutput {
    graph: Graph,
    forest: SpanningForest,
    stats: PipelineStats,
}

impl PipelineOutput {
    /// The graph after significance filtering, over every surviving track.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &Graph { &self.graph }

    /// The maximum spanning forest of [`PipelineOutput::graph`].
    #[must_use]
    #[rustfmt::skip]
    pub fn forest(&self) -> &SpanningForest { &self.forest }

    /// Counters gathered while running.
    #[must_use]
    #[rustfmt::skip]
    pub const fn stats(&self) -> &PipelineStats { &self.stats }

    /// Splits the output into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Graph, SpanningForest, PipelineStats) {
        (self.graph, self.forest, self.stats)
    }
}

/// Entry point for running the co-occurrence pipeline.
///
/// Build instances with [`crate::PipelineBuilder`].
///
/// # Examples
/// ```
/// use cotrack_core::{PipelineBuilder, PlaylistCorpus};
///
/// let corpus = PlaylistCorpus::from_names(
///     "demo",
///     &[&["A", "B", "C"], &["A", "B"], &["A", "C"]],
/// );
/// let pipeline = PipelineBuilder::new().build()?;
/// let output = pipeline.run(&corpus)?;
/// assert_eq!(output.graph().edges().len(), 3);
/// assert_eq!(output.forest().total_weight(), 4);
/// assert_eq!(output.stats().components, 1);
/// # Ok::<(), cotrack_core::CotrackError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Pipeline {
    popularity: PopularityFilter,
    significance: EdgeSignificanceFilter,
    normalization: NameNormalization,
    playlist_limit: Option<usize>,
    execution_strategy: ExecutionStrategy,
    empty_corpus_policy: EmptyCorpusPolicy,
}

impl Pipeline {
    pub(crate) const fn new(
        popularity: PopularityFilter,
        significance: EdgeSignificanceFilter,
        normalization: NameNormalization,
        playlist_limit: Option<usize>,
        execution_strategy: ExecutionStrategy,
        empty_corpus_policy: EmptyCorpusPolicy,
    ) -> Self {
        Self {
            popularity,
            significance,
            normalization,
            playlist_limit,
            execution_strategy,
            empty_corpus_policy,
        }
    }

    /// Returns the configured popularity filter.
    #[must_use]
    #[rustfmt::skip]
    pub const fn popularity_filter(&self) -> PopularityFilter { self.popularity }

    /// Returns the configured significance filter.
    #[must_use]
    #[rustfmt::skip]
    pub const fn significance_filter(&self) -> EdgeSignificanceFilter { self.significance }

    /// Returns the configured name normalization.
    #[must_use]
    #[rustfmt::skip]
    pub const fn normalization(&self) -> NameNormalization { self.normalization }

    /// Returns the configured playlist limit.
    #[must_use]
    #[rustfmt::skip]
    pub const fn playlist_limit(&self) -> Option<usize> { self.playlist_limit }

    /// Returns the execution strategy used by the graph and forest stages.
    #[must_use]
    #[rustfmt::skip]
    pub const fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Returns the configured empty corpus policy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn empty_corpus_policy(&self) -> EmptyCorpusPolicy { self.empty_corpus_policy }

    /// Executes every stage against `source`.
    ///
    /// Every playlist is read and counted by the popularity filter; the
    /// playlist limit only restricts which filtered playlists feed the graph.
    ///
    /// # Errors
    /// Returns [`CotrackError::PlaylistSource`] when the source fails to
    /// produce a playlist, [`CotrackError::MalformedInput`] when a track name
    /// is empty after normalization, and [`CotrackError::EmptyCorpus`] when
    /// no track survives filtering under [`EmptyCorpusPolicy::Reject`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            playlists = source.len(),
            limit = ?self.playlist_limit,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run<S: PlaylistSource>(&self, source: &S) -> Result<PipelineOutput> {
        let normalized = self.read_playlists(source)?;
        let popular = self.popularity.apply(&normalized);

        let considered = self
            .playlist_limit
            .map_or(normalized.len(), |limit| limit.min(normalized.len()));
        let mut filtered = popular.playlists;
        filtered.truncate(considered);
        let playlists_emptied = normalized
            .iter()
            .zip(&filtered)
            .filter(|(before, after)| !before.is_empty() && after.is_empty())
            .count();
        if filtered.iter().all(Playlist::is_empty) {
            self.handle_empty_corpus(source)?;
        }

        let graph = CooccurrenceGraphBuilder::new()
            .with_execution_strategy(self.execution_strategy)
            .build(&filtered)?;
        let edges_before_filter = graph.edges().len();
        let graph = self.significance.apply(&graph);
        let forest = MaximumSpanningForest::new()
            .with_execution_strategy(self.execution_strategy)
            .extract(&graph)?;

        let stats = PipelineStats {
            playlists_read: filtered.len(),
            playlists_emptied,
            tracks_before_filter: popular.distinct_before,
            tracks_after_filter: graph.node_count(),
            edges_before_filter,
            edges_after_filter: graph.edges().len(),
            forest_edges: forest.edges().len(),
            components: forest.component_count(),
            forest_weight: forest.total_weight(),
        };
        info!(
            nodes = stats.tracks_after_filter,
            edges = stats.edges_after_filter,
            forest_edges = stats.forest_edges,
            components = stats.components,
            "pipeline completed"
        );
        Ok(PipelineOutput {
            graph,
            forest,
            stats,
        })
    }

    fn read_playlists<S: PlaylistSource>(&self, source: &S) -> Result<Vec<Playlist>> {
        (0..source.len())
            .map(|index| {
                let playlist = source
                    .playlist(index)
                    .map_err(|error| CotrackError::PlaylistSource {
                        data_source: Arc::from(source.name()),
                        error,
                    })?;
                self.normalize(source.name(), index, playlist)
            })
            .collect()
    }

    fn normalize(&self, data_source: &str, index: usize, playlist: &Playlist) -> Result<Playlist> {
        playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let normalized = self.normalization.apply(name);
                if normalized.is_empty() {
                    return Err(CotrackError::MalformedInput {
                        data_source: Arc::from(data_source),
                        playlist: index,
                        position,
                        reason: Arc::from("track name is empty"),
                    });
                }
                Ok(normalized.into_owned())
            })
            .collect::<Result<Vec<_>>>()
            .map(Playlist::new)
    }

    fn handle_empty_corpus<S: PlaylistSource>(&self, source: &S) -> Result<()> {
        match self.empty_corpus_policy {
            EmptyCorpusPolicy::Reject => Err(CotrackError::EmptyCorpus {
                data_source: Arc::from(source.name()),
            }),
            EmptyCorpusPolicy::Allow => {
                warn!(
                    data_source = source.name(),
                    "no tracks survived filtering, producing empty outputs"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{PipelineBuilder, PlaylistCorpus, error::PlaylistSourceError};

    struct FailingSource;

    impl PlaylistSource for FailingSource {
        fn len(&self) -> usize {
            2
        }

        fn name(&self) -> &str {
            "failing"
        }

        fn playlist(&self, index: usize) -> core::result::Result<&Playlist, PlaylistSourceError> {
            Err(PlaylistSourceError::Malformed {
                index,
                reason: Arc::from("truncated record"),
            })
        }
    }

    fn pipeline() -> Pipeline {
        PipelineBuilder::new()
            .with_execution_strategy(ExecutionStrategy::Sequential)
            .build()
            .expect("configuration is valid")
    }

    #[rstest]
    fn wraps_source_failures() {
        let err = pipeline().run(&FailingSource).expect_err("source must fail");
        assert_eq!(err.code().as_str(), "COTRACK_PLAYLIST_SOURCE_FAILURE");
        assert_eq!(
            err.playlist_source_code().map(|code| code.as_str()),
            Some("PLAYLIST_SOURCE_MALFORMED")
        );
    }

    #[rstest]
    fn playlist_limit_still_reads_every_record() {
        let pipeline = PipelineBuilder::new()
            .with_playlist_limit(Some(0))
            .build()
            .expect("configuration is valid");
        let err = pipeline
            .run(&FailingSource)
            .expect_err("records past the limit are still counted");
        assert_eq!(err.code().as_str(), "COTRACK_PLAYLIST_SOURCE_FAILURE");
    }

    #[rstest]
    fn rejects_names_empty_after_normalization() {
        let corpus = PlaylistCorpus::from_names("blank", &[&["a", "b"], &["c", "   "]]);
        let pipeline = PipelineBuilder::new()
            .with_normalization(NameNormalization::Trim)
            .build()
            .expect("configuration is valid");
        let err = pipeline.run(&corpus).expect_err("blank name must fail");
        assert_eq!(
            err,
            CotrackError::MalformedInput {
                data_source: Arc::from("blank"),
                playlist: 1,
                position: 1,
                reason: Arc::from("track name is empty"),
            }
        );
    }

    #[rstest]
    fn exact_normalization_keeps_whitespace_names() {
        let corpus = PlaylistCorpus::from_names("spaces", &[&["a", " a "]]);
        let output = pipeline().run(&corpus).expect("run must succeed");
        assert_eq!(output.graph().node_count(), 2);
    }

    #[rstest]
    fn trim_lowercase_merges_spellings() {
        let corpus = PlaylistCorpus::from_names(
            "spellings",
            &[&["Africa", "Rosanna"], &[" africa ", "ROSANNA"]],
        );
        let pipeline = PipelineBuilder::new()
            .with_normalization(NameNormalization::TrimLowercase)
            .build()
            .expect("configuration is valid");
        let output = pipeline.run(&corpus).expect("run must succeed");
        assert_eq!(output.graph().weight_between_names("africa", "rosanna"), Some(2));
    }
}
