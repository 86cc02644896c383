//! Builder utilities for configuring cotrack pipelines.
//!
//! Exposes the execution strategy selection surface and the validation run
//! before a [`Pipeline`] is constructed.

use crate::{
    Result,
    catalog::NameNormalization,
    error::CotrackError,
    pipeline::Pipeline,
    popularity::PopularityFilter,
    significance::EdgeSignificanceFilter,
};

/// Selects how graph construction and the forest sort are executed.
///
/// `Auto` resolves deterministically: it runs in parallel when the crate is
/// built with the `parallel` feature and sequentially otherwise. Both paths
/// produce identical graphs and forests.
///
/// # Examples
/// ```
/// use cotrack_core::ExecutionStrategy;
///
/// assert_eq!(ExecutionStrategy::default(), ExecutionStrategy::Auto);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ExecutionStrategy {
    /// Allow the library to select an appropriate backend automatically.
    #[default]
    Auto,
    /// Restrict execution to the calling thread.
    Sequential,
    /// Fan work out over the Rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Resolves the strategy against the features compiled into this build.
    pub(crate) const fn runs_parallel(self) -> Result<bool> {
        match self {
            Self::Auto => Ok(cfg!(feature = "parallel")),
            Self::Sequential => Ok(false),
            #[cfg(feature = "parallel")]
            Self::Parallel => Ok(true),
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => Err(CotrackError::BackendUnavailable {
                requested: Self::Parallel,
            }),
        }
    }
}

/// Controls what happens when no track survives ingestion and filtering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EmptyCorpusPolicy {
    /// Log a warning and return an empty graph and forest.
    #[default]
    Allow,
    /// Fail with [`CotrackError::EmptyCorpus`].
    Reject,
}

/// Configures and constructs [`Pipeline`] instances.
///
/// Thresholds are taken as signed integers so that negative values coming
/// from configuration surfaces are reported as
/// [`CotrackError::InvalidArgument`] by [`PipelineBuilder::build`] rather
/// than silently wrapped.
///
/// # Examples
/// ```
/// use cotrack_core::{ExecutionStrategy, PipelineBuilder};
///
/// let pipeline = PipelineBuilder::new()
///     .with_min_track_occurrences(2)
///     .with_min_edge_weight(1)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(pipeline.popularity_filter().min_occurrences(), 2);
/// assert_eq!(pipeline.significance_filter().min_weight(), 1);
/// assert_eq!(pipeline.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PipelineBuilder {
    min_track_occurrences: i64,
    min_edge_weight: i64,
    normalization: NameNormalization,
    playlist_limit: Option<usize>,
    execution_strategy: ExecutionStrategy,
    empty_corpus_policy: EmptyCorpusPolicy,
}

impl PipelineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::{EmptyCorpusPolicy, ExecutionStrategy, PipelineBuilder};
    ///
    /// let builder = PipelineBuilder::new();
    /// assert_eq!(builder.min_track_occurrences(), 0);
    /// assert_eq!(builder.min_edge_weight(), 0);
    /// assert_eq!(builder.playlist_limit(), None);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.empty_corpus_policy(), EmptyCorpusPolicy::Allow);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the minimum corpus-wide occurrence count a track needs.
    #[must_use]
    pub const fn with_min_track_occurrences(mut self, threshold: i64) -> Self {
        self.min_track_occurrences = threshold;
        self
    }

    /// Returns the configured popularity threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_track_occurrences(&self) -> i64 { self.min_track_occurrences }

    /// Overrides the edge weight an edge must exceed to be kept.
    #[must_use]
    pub const fn with_min_edge_weight(mut self, threshold: i64) -> Self {
        self.min_edge_weight = threshold;
        self
    }

    /// Returns the configured significance threshold.
    #[must_use]
    #[rustfmt::skip]
    pub const fn min_edge_weight(&self) -> i64 { self.min_edge_weight }

    /// Sets how track names are canonicalized before identity comparison.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::{NameNormalization, PipelineBuilder};
    ///
    /// let builder = PipelineBuilder::new().with_normalization(NameNormalization::Trim);
    /// assert_eq!(builder.normalization(), NameNormalization::Trim);
    /// ```
    #[must_use]
    pub const fn with_normalization(mut self, normalization: NameNormalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Returns the configured name normalization.
    #[must_use]
    #[rustfmt::skip]
    pub const fn normalization(&self) -> NameNormalization { self.normalization }

    /// Restricts the run to the first `limit` playlists of the source.
    ///
    /// `None` considers every playlist.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::PipelineBuilder;
    ///
    /// let builder = PipelineBuilder::new().with_playlist_limit(Some(1000));
    /// assert_eq!(builder.playlist_limit(), Some(1000));
    /// ```
    #[must_use]
    pub const fn with_playlist_limit(mut self, limit: Option<usize>) -> Self {
        self.playlist_limit = limit;
        self
    }

    /// Returns the configured playlist limit.
    #[must_use]
    #[rustfmt::skip]
    pub const fn playlist_limit(&self) -> Option<usize> { self.playlist_limit }

    /// Sets the execution strategy used for graph construction and sorting.
    #[must_use]
    pub const fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn execution_strategy(&self) -> ExecutionStrategy { self.execution_strategy }

    /// Chooses whether an empty corpus is reported as an error.
    #[must_use]
    pub const fn with_empty_corpus_policy(mut self, policy: EmptyCorpusPolicy) -> Self {
        self.empty_corpus_policy = policy;
        self
    }

    /// Returns the configured empty corpus policy.
    #[must_use]
    #[rustfmt::skip]
    pub const fn empty_corpus_policy(&self) -> EmptyCorpusPolicy { self.empty_corpus_policy }

    /// Validates the configuration and constructs a [`Pipeline`].
    ///
    /// # Errors
    /// Returns [`CotrackError::InvalidArgument`] when either threshold is
    /// negative and [`CotrackError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use cotrack_core::{CotrackError, PipelineBuilder};
    ///
    /// let err = PipelineBuilder::new()
    ///     .with_min_edge_weight(-1)
    ///     .build()
    ///     .expect_err("negative thresholds are rejected");
    /// assert!(matches!(
    ///     err,
    ///     CotrackError::InvalidArgument { parameter: "min_edge_weight", got: -1 }
    /// ));
    /// ```
    pub fn build(self) -> Result<Pipeline> {
        let popularity = PopularityFilter::new(self.min_track_occurrences)?;
        let significance = EdgeSignificanceFilter::new(self.min_edge_weight)?;
        self.execution_strategy.runs_parallel()?;

        Ok(Pipeline::new(
            popularity,
            significance,
            self.normalization,
            self.playlist_limit,
            self.execution_strategy,
            self.empty_corpus_policy,
        ))
    }
}
